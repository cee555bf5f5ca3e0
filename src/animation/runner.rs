//! Animation runner tracks the timing of a single run.

use std::fmt;

use web_time::{Duration, Instant};

use super::interpolation::SharedInterpolator;

/// Converts wall-clock time into progress for one animation run.
///
/// The duration and curve are captured when the run starts, so later
/// reconfiguration of the owning animator never affects a run in flight.
#[derive(Clone)]
pub struct AnimationRunner {
    /// When the animation started.
    start_time: Instant,
    /// Total duration of the run.
    duration: Duration,
    /// Progress curve.
    interpolator: SharedInterpolator,
}

impl AnimationRunner {
    /// Start a new run now.
    #[must_use]
    pub fn new(duration: Duration, interpolator: SharedInterpolator) -> Self {
        Self::with_start_time(Instant::now(), duration, interpolator)
    }

    /// Create with explicit start time.
    #[must_use]
    pub fn with_start_time(
        start_time: Instant,
        duration: Duration,
        interpolator: SharedInterpolator,
    ) -> Self {
        Self {
            start_time,
            duration,
            interpolator,
        }
    }

    /// Get the total animation duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Get the progress curve of this run.
    #[must_use]
    pub fn interpolator(&self) -> &SharedInterpolator {
        &self.interpolator
    }

    /// Calculate normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);

        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Whether the animation has reached completion.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Apply the progress curve to `raw_t`. Completion always reports 1.0.
    #[must_use]
    pub fn eased_t(&self, raw_t: f32) -> f32 {
        if raw_t >= 1.0 {
            return 1.0;
        }
        self.interpolator.interpolate(raw_t)
    }

    /// Eased progress at `now`.
    #[must_use]
    pub fn eased(&self, now: Instant) -> f32 {
        self.eased_t(self.progress(now))
    }
}

impl fmt::Debug for AnimationRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRunner")
            .field("interpolator", &self.interpolator.name())
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
