//! Frame pacing for timer-driven animation ticks.

use web_time::{Duration, Instant};

/// Fixed-rate tick pacing with a smoothed measured frame rate.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target ticks per second (never zero).
    target_fps: u32,
    /// Sleep between ticks derived from the target rate
    interval: Duration,
    /// Last tick timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer for the given tick rate. A rate of 0 is treated
    /// as 1 tick per second.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            interval: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_frame: Instant::now(),
            smoothed_fps: target_fps as f32,
            smoothing: 0.05, // 5% new value, 95% old value
        }
    }

    /// Target ticks per second.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Time between two ticks at the target rate.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a tick at `now`, updating the smoothed rate.
    pub fn end_frame(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_follows_target_rate() {
        let timing = FrameTiming::new(50);
        assert_eq!(timing.interval(), Duration::from_millis(20));
        assert_eq!(timing.target_fps(), 50);
    }

    #[test]
    fn zero_rate_is_clamped() {
        let timing = FrameTiming::new(0);
        assert_eq!(timing.target_fps(), 1);
        assert_eq!(timing.interval(), Duration::from_secs(1));
    }

    #[test]
    fn smoothed_rate_moves_toward_measured() {
        let mut timing = FrameTiming::new(60);
        let start = Instant::now();
        timing.end_frame(start + Duration::from_millis(100));
        // One 10 fps sample pulls the average down from 60
        assert!(timing.fps() < 60.0);
        assert!(timing.fps() > 10.0);
    }
}
