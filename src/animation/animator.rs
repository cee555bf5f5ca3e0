//! The clock-agnostic animator contract.
//!
//! An [`Animator`] turns time into a progress value in `[0, 1]` and reports
//! it through a callback. It never touches the diff engine; a controller
//! wires `animator.start(move |p| frame = processor.progress_diff(p))`.
//!
//! Lifecycle: `Idle → Running → (completed | cancelled) → Idle`.

use web_time::Duration;

use super::interpolation::SharedInterpolator;

/// Callback receiving eased progress values.
pub type ProgressCallback = Box<dyn FnMut(f32) + Send>;

/// Observable animator state. Completed and cancelled runs both return to
/// [`AnimatorState::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorState {
    /// No run in progress.
    #[default]
    Idle,
    /// A run is delivering progress.
    Running,
}

/// Drives progress from 0 to 1 over a duration using a progress curve.
pub trait Animator: Send {
    /// Start a run, replacing any run in progress.
    ///
    /// `on_progress` is invoked once synchronously with the starting
    /// progress, then on the animator's schedule until progress reaches 1
    /// or the run is cancelled.
    fn start(&mut self, on_progress: ProgressCallback);

    /// Stop the current run. No callback invocation starts after this
    /// returns. Cancelling an idle animator is a no-op.
    fn cancel(&mut self);

    /// Current lifecycle state.
    fn state(&self) -> AnimatorState;

    /// Whether a run is in progress.
    fn is_running(&self) -> bool {
        self.state() == AnimatorState::Running
    }

    /// Duration of subsequent runs.
    fn duration(&self) -> Duration;

    /// Set the duration of subsequent runs.
    fn set_duration(&mut self, duration: Duration);

    /// Progress curve of subsequent runs.
    fn interpolator(&self) -> &SharedInterpolator;

    /// Set the progress curve of subsequent runs.
    fn set_interpolator(&mut self, interpolator: SharedInterpolator);
}
