//! Transition controller wiring a shared diff processor to an animator.
//!
//! Each [`update`](TransitionController::update) commits the new dataset
//! and restarts the animator; every progress tick materializes a frame and
//! hands it to the single frame callback registered with
//! [`on_frame`](TransitionController::on_frame).

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::animation::Animator;
use crate::data::Series;
use crate::diff::SharedDiffProcessor;
use crate::options::AnimationOptions;

/// Receives each materialized frame on the animator's thread.
pub type FrameCallback = Box<dyn FnMut(&[Series]) + Send>;

#[derive(Default)]
struct FrameSink {
    latest: Mutex<Vec<Series>>,
    callback: Mutex<Option<FrameCallback>>,
}

impl FrameSink {
    fn publish(&self, frame: Vec<Series>) {
        let mut callback = relock(&self.callback);
        if let Some(callback) = callback.as_mut() {
            callback(&frame);
        }
        *relock(&self.latest) = frame;
    }
}

fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controls when transitions start, and where their frames go.
///
/// Responsibilities:
/// - Commit new datasets to the diff processor
/// - Restart the animator for every commit (or snap when disabled)
/// - Publish each interpolated frame to the owner's callback
pub struct TransitionController {
    processor: SharedDiffProcessor,
    animator: Box<dyn Animator>,
    sink: Arc<FrameSink>,
    enabled: bool,
}

impl TransitionController {
    /// Controller with an empty processor driven by `animator`.
    #[must_use]
    pub fn new(animator: Box<dyn Animator>) -> Self {
        Self::with_processor(SharedDiffProcessor::new(), animator)
    }

    /// Controller around an existing processor handle.
    #[must_use]
    pub fn with_processor(
        processor: SharedDiffProcessor,
        animator: Box<dyn Animator>,
    ) -> Self {
        Self {
            processor,
            animator,
            sink: Arc::new(FrameSink::default()),
            enabled: true,
        }
    }

    /// Controller with a background animator configured from `options`.
    #[must_use]
    pub fn from_options(options: &AnimationOptions) -> Self {
        let mut controller = Self::new(Box::new(options.thread_animator()));
        controller.enabled = options.enabled;
        controller
    }

    /// Apply timing, curve and enabled flag to subsequent transitions.
    pub fn apply_options(&mut self, options: &AnimationOptions) {
        self.animator.set_duration(options.duration());
        self.animator.set_interpolator(options.interpolator());
        self.set_enabled(options.enabled);
    }

    /// Register the frame callback, replacing any previous one.
    pub fn on_frame<F>(&mut self, callback: F)
    where
        F: FnMut(&[Series]) + Send + 'static,
    {
        *relock(&self.sink.callback) = Some(Box::new(callback));
    }

    /// Remove the frame callback.
    pub fn clear_on_frame(&mut self) {
        *relock(&self.sink.callback) = None;
    }

    /// Commit `new` and transition to it from the previous target.
    pub fn update(&mut self, new: Vec<Series>) {
        log::debug!(
            "transition update: {} series, animated={}",
            new.len(),
            self.enabled
        );
        self.processor.set_entries(new);

        if !self.enabled {
            self.animator.cancel();
            self.sink.publish(self.processor.progress_diff(1.0));
            return;
        }

        let processor = self.processor.clone();
        let sink = Arc::clone(&self.sink);
        self.animator.start(Box::new(move |progress| {
            sink.publish(processor.progress_diff(progress));
        }));
    }

    /// Stop the running transition. The last published frame stays current.
    pub fn cancel(&mut self) {
        self.animator.cancel();
    }

    /// Most recently published frame.
    #[must_use]
    pub fn latest_frame(&self) -> Vec<Series> {
        relock(&self.sink.latest).clone()
    }

    /// Whether a transition is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Enable or disable animation.
    ///
    /// Disabling mid-transition cancels it and publishes the final frame.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled && self.animator.is_running() {
            self.animator.cancel();
            self.sink.publish(self.processor.progress_diff(1.0));
        }
        self.enabled = enabled;
    }

    /// Check if animation is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Shared handle to the diff processor.
    #[must_use]
    pub fn processor(&self) -> &SharedDiffProcessor {
        &self.processor
    }

    /// The animator driving transitions.
    #[must_use]
    pub fn animator(&self) -> &dyn Animator {
        self.animator.as_ref()
    }

    /// Mutable access to the animator.
    pub fn animator_mut(&mut self) -> &mut dyn Animator {
        self.animator.as_mut()
    }
}

impl Drop for TransitionController {
    fn drop(&mut self) {
        self.animator.cancel();
    }
}

impl fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionController")
            .field("processor", &self.processor)
            .field("state", &self.animator.state())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use web_time::{Duration, Instant};

    use super::*;
    use crate::animation::{AnimatorState, ManualAnimator};
    use crate::util::easing::EasingFunction;

    fn series(points: &[(f32, f32)]) -> Series {
        Series::from(points.to_vec())
    }

    fn controller() -> (TransitionController, ManualAnimator, Arc<Mutex<Vec<Vec<Series>>>>) {
        let manual = ManualAnimator::new();
        let mut controller = TransitionController::new(Box::new(manual.clone()));
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);
        controller.on_frame(move |frame| sink.lock().unwrap().push(frame.to_vec()));
        (controller, manual, frames)
    }

    #[test]
    fn nothing_published_before_first_update() {
        let (controller, _manual, frames) = controller();
        assert!(controller.latest_frame().is_empty());
        assert!(frames.lock().unwrap().is_empty());
    }

    #[test]
    fn first_update_grows_from_zero() {
        let (mut controller, manual, frames) = controller();
        controller.update(vec![series(&[(0.0, 4.0), (1.0, 2.0)])]);
        assert!(controller.is_animating());

        assert!(manual.advance(0.5));
        assert!(manual.finish());
        assert!(!controller.is_animating());

        assert_eq!(
            *frames.lock().unwrap(),
            vec![
                vec![series(&[(0.0, 0.0), (1.0, 0.0)])],
                vec![series(&[(0.0, 2.0), (1.0, 1.0)])],
                vec![series(&[(0.0, 4.0), (1.0, 2.0)])],
            ]
        );
        assert_eq!(controller.latest_frame(), vec![series(&[(0.0, 4.0), (1.0, 2.0)])]);
    }

    #[test]
    fn removed_entries_shrink_then_disappear() {
        let (mut controller, manual, _frames) = controller();
        controller.update(vec![series(&[(0.0, 1.0), (1.0, 1.0)])]);
        let _ = manual.finish();

        controller.update(vec![series(&[(0.0, 1.0)])]);
        let _ = manual.advance(0.5);
        assert_eq!(
            controller.latest_frame(),
            vec![series(&[(0.0, 1.0), (1.0, 0.5)])]
        );
        let _ = manual.finish();
        assert_eq!(controller.latest_frame(), vec![series(&[(0.0, 1.0)])]);
    }

    #[test]
    fn interrupted_transition_rebases_on_previous_target() {
        let (mut controller, manual, _frames) = controller();
        controller.update(vec![series(&[(0.0, 0.0)])]);
        let _ = manual.finish();
        controller.update(vec![series(&[(0.0, 10.0)])]);
        let _ = manual.advance(0.5);
        assert_eq!(controller.latest_frame(), vec![series(&[(0.0, 5.0)])]);

        // The new transition starts at the last committed target.
        controller.update(vec![series(&[(0.0, 20.0)])]);
        assert_eq!(controller.latest_frame(), vec![series(&[(0.0, 10.0)])]);
        let _ = manual.advance(0.5);
        assert_eq!(controller.latest_frame(), vec![series(&[(0.0, 15.0)])]);
    }

    #[test]
    fn cancel_after_one_tick_stops_frames() {
        let (mut controller, manual, frames) = controller();
        controller.update(vec![series(&[(0.0, 8.0)])]);
        assert!(manual.advance(0.25));
        controller.cancel();

        assert!(!manual.advance(0.5));
        assert!(!manual.finish());
        assert_eq!(frames.lock().unwrap().len(), 2);
        assert_eq!(controller.latest_frame(), vec![series(&[(0.0, 2.0)])]);
        assert_eq!(controller.animator().state(), AnimatorState::Idle);
    }

    #[test]
    fn disabled_controller_snaps_to_target() {
        let (mut controller, manual, frames) = controller();
        controller.set_enabled(false);
        controller.update(vec![series(&[(0.0, 3.0)])]);

        assert!(!controller.is_animating());
        assert_eq!(manual.deliveries(), 0);
        assert_eq!(*frames.lock().unwrap(), vec![vec![series(&[(0.0, 3.0)])]]);
    }

    #[test]
    fn disabling_mid_transition_publishes_final_frame() {
        let (mut controller, manual, _frames) = controller();
        controller.update(vec![series(&[(0.0, 3.0)])]);
        let _ = manual.advance(0.5);

        controller.set_enabled(false);
        assert!(!controller.is_enabled());
        assert!(!controller.is_animating());
        assert_eq!(controller.latest_frame(), vec![series(&[(0.0, 3.0)])]);
    }

    #[test]
    fn options_configure_animator_and_flag() {
        let options = AnimationOptions {
            enabled: false,
            duration_ms: 50,
            ..AnimationOptions::default()
        };
        let mut controller = TransitionController::new(Box::new(ManualAnimator::new()));
        controller.apply_options(&options);
        assert!(!controller.is_enabled());
        assert_eq!(controller.animator().duration(), Duration::from_millis(50));
        assert_eq!(controller.animator().interpolator().name(), "cubic-hermite");

        let built = TransitionController::from_options(&options);
        assert!(!built.is_enabled());
        assert_eq!(built.animator().duration(), Duration::from_millis(50));
    }

    #[test]
    fn configured_curve_applies_to_every_animator_handle() {
        let (mut controller, manual, _frames) = controller();
        controller.apply_options(&AnimationOptions {
            easing: EasingFunction::QuadraticIn,
            ..AnimationOptions::default()
        });
        controller.update(vec![series(&[(0.0, 10.0)])]);

        assert!(manual.advance(0.5));
        assert_eq!(controller.latest_frame()[0].value_at(0.0), Some(2.5));
    }

    #[test]
    fn background_animator_reaches_target() {
        let options = AnimationOptions {
            duration_ms: 30,
            frame_rate: 240,
            ..AnimationOptions::default()
        };
        let mut controller = TransitionController::from_options(&options);
        controller.update(vec![series(&[(0.0, 1.0), (2.0, 5.0)])]);

        let deadline = Instant::now() + Duration::from_secs(5);
        while controller.is_animating() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!controller.is_animating());
        assert_eq!(
            controller.latest_frame(),
            vec![series(&[(0.0, 1.0), (2.0, 5.0)])]
        );
    }

    #[test]
    fn listeners_on_shared_processor_see_commits() {
        let (mut controller, _manual, _frames) = controller();
        let commits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&commits);
        let _ = controller
            .processor()
            .subscribe(move |_| *counter.lock().unwrap() += 1);

        controller.update(vec![series(&[(0.0, 1.0)])]);
        controller.update(vec![series(&[(0.0, 2.0)])]);
        assert_eq!(*commits.lock().unwrap(), 2);
    }
}
