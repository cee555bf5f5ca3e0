use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::animation::{shared, SharedInterpolator, ThreadAnimator};
use crate::util::easing::EasingFunction;

/// Transition animation timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Animate updates; when false, new data is shown immediately.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Length of one transition in milliseconds.
    #[schemars(title = "Duration (ms)", range(max = 60_000))]
    pub duration_ms: u64,
    /// Timer ticks per second for the background animator.
    #[schemars(title = "Frame Rate", range(min = 1, max = 240))]
    pub frame_rate: u32,
    /// Progress curve.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}

impl AnimationOptions {
    /// Transition duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Progress curve as a shareable interpolator.
    #[must_use]
    pub fn interpolator(&self) -> SharedInterpolator {
        shared(self.easing)
    }

    /// Background animator configured from these options.
    #[must_use]
    pub fn thread_animator(&self) -> ThreadAnimator {
        ThreadAnimator::with_timing(
            self.duration(),
            self.interpolator(),
            self.frame_rate,
        )
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 300,
            frame_rate: 60,
            easing: EasingFunction::DEFAULT,
        }
    }
}
