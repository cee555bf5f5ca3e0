//! Animator driven by the host's frame callback.

use std::fmt;

use web_time::{Duration, Instant};

use super::animator::{Animator, AnimatorState, ProgressCallback};
use super::interpolation::{shared, SharedInterpolator};
use super::runner::AnimationRunner;
use crate::util::easing::EasingFunction;

struct ActiveRun {
    runner: AnimationRunner,
    on_progress: ProgressCallback,
    last_t: f32,
}

/// Animator advanced by calling [`FrameAnimator::tick`] once per rendered
/// frame.
///
/// Ticks and cancellation both take `&mut self`, so a callback can never
/// observe a cancelled run.
pub struct FrameAnimator {
    duration: Duration,
    interpolator: SharedInterpolator,
    run: Option<ActiveRun>,
}

impl FrameAnimator {
    /// Animator with the standard 300ms cubic hermite ease-out.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timing(Duration::from_millis(300), shared(EasingFunction::DEFAULT))
    }

    /// Animator with explicit duration and curve.
    #[must_use]
    pub fn with_timing(
        duration: Duration,
        interpolator: SharedInterpolator,
    ) -> Self {
        Self {
            duration,
            interpolator,
            run: None,
        }
    }

    /// Start a run whose clock begins at `now`.
    pub fn start_at(&mut self, now: Instant, mut on_progress: ProgressCallback) {
        if self.run.is_some() {
            log::debug!("frame animator restarted mid-run");
        }
        let runner = AnimationRunner::with_start_time(
            now,
            self.duration,
            self.interpolator.clone(),
        );
        on_progress(runner.eased_t(0.0));
        self.run = Some(ActiveRun {
            runner,
            on_progress,
            last_t: 0.0,
        });
    }

    /// Advance the current run to `now`.
    ///
    /// Returns `true` if the animation is still running afterwards.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };

        let raw_t = run.runner.progress(now);
        if raw_t < run.last_t {
            log::warn!("non-monotonic frame tick: {raw_t} after {}", run.last_t);
        }
        run.last_t = raw_t;
        (run.on_progress)(run.runner.eased_t(raw_t));

        if raw_t >= 1.0 {
            self.run = None;
            return false;
        }
        true
    }

    /// Raw progress of the current run at `now`, if any.
    #[must_use]
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.run.as_ref().map(|run| run.runner.progress(now))
    }
}

impl Default for FrameAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for FrameAnimator {
    fn start(&mut self, on_progress: ProgressCallback) {
        self.start_at(Instant::now(), on_progress);
    }

    fn cancel(&mut self) {
        self.run = None;
    }

    fn state(&self) -> AnimatorState {
        if self.run.is_some() {
            AnimatorState::Running
        } else {
            AnimatorState::Idle
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    fn interpolator(&self) -> &SharedInterpolator {
        &self.interpolator
    }

    fn set_interpolator(&mut self, interpolator: SharedInterpolator) {
        self.interpolator = interpolator;
    }
}

impl fmt::Debug for FrameAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameAnimator")
            .field("duration", &self.duration)
            .field("interpolator", &self.interpolator.name())
            .field("running", &self.run.is_some())
            .finish()
    }
}
