//! Deterministic animator that only reports progress when told to.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use web_time::Duration;

use super::animator::{Animator, AnimatorState, ProgressCallback};
use super::interpolation::{shared, SharedInterpolator};
use crate::util::easing::EasingFunction;

struct ManualState {
    /// Bumped on every start and cancel so stale callbacks are not restored.
    generation: u64,
    running: bool,
    on_progress: Option<ProgressCallback>,
    /// Curve captured at start; every handle advances the run with it.
    curve: Option<SharedInterpolator>,
    last_progress: f32,
    deliveries: usize,
}

/// Manually stepped animator for reproducible tests and offline rendering.
///
/// Cloning yields another handle to the same animator, so a test can keep
/// one handle while a controller owns the other. Duration, curve and start
/// progress are per-handle settings; a run uses the settings of the handle
/// that started it, whichever handle advances it. Callbacks run on the
/// thread that calls [`advance`](Self::advance), outside the internal lock,
/// so they may cancel or restart the animator re-entrantly.
#[derive(Clone)]
pub struct ManualAnimator {
    state: Arc<Mutex<ManualState>>,
    start_progress: f32,
    duration: Duration,
    interpolator: SharedInterpolator,
}

impl ManualAnimator {
    /// Animator that starts at progress 0 with a linear curve.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Animator whose runs start at `start_progress`.
    #[must_use]
    pub fn starting_at(start_progress: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                generation: 0,
                running: false,
                on_progress: None,
                curve: None,
                last_progress: 0.0,
                deliveries: 0,
            })),
            start_progress,
            duration: Duration::ZERO,
            interpolator: shared(EasingFunction::Linear),
        }
    }

    /// Report raw progress `t` to the running callback.
    ///
    /// Progress at or past 1.0 completes the run. Returns whether a callback
    /// was invoked.
    #[must_use]
    pub fn advance(&self, t: f32) -> bool {
        let (generation, callback, progress) = {
            let mut state = self.lock();
            if !state.running {
                return false;
            }
            let progress = if t >= 1.0 {
                1.0
            } else {
                state
                    .curve
                    .as_ref()
                    .unwrap_or(&self.interpolator)
                    .interpolate(t)
            };
            if progress < state.last_progress {
                log::warn!(
                    "non-monotonic progress: {progress} after {}",
                    state.last_progress
                );
            }
            state.last_progress = progress;
            (state.generation, state.on_progress.take(), progress)
        };
        let Some(mut callback) = callback else {
            return false;
        };

        callback(progress);

        let mut state = self.lock();
        state.deliveries += 1;
        if state.generation == generation {
            if t >= 1.0 {
                state.running = false;
            } else {
                state.on_progress = Some(callback);
            }
        }
        true
    }

    /// Complete the current run.
    #[must_use]
    pub fn finish(&self) -> bool {
        self.advance(1.0)
    }

    /// Number of callback invocations across all runs.
    #[must_use]
    pub fn deliveries(&self) -> usize {
        self.lock().deliveries
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for ManualAnimator {
    fn start(&mut self, mut on_progress: ProgressCallback) {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.running = true;
            state.on_progress = None;
            state.curve = Some(self.interpolator.clone());
            state.last_progress = self.interpolator.interpolate(self.start_progress);
            state.generation
        };

        let start = self.interpolator.interpolate(self.start_progress);
        on_progress(start);

        let mut state = self.lock();
        state.deliveries += 1;
        if state.generation == generation {
            state.on_progress = Some(on_progress);
        }
    }

    fn cancel(&mut self) {
        let mut state = self.lock();
        if state.running {
            log::debug!("manual animator cancelled");
        }
        state.generation += 1;
        state.running = false;
        state.on_progress = None;
        state.curve = None;
    }

    fn state(&self) -> AnimatorState {
        if self.lock().running {
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

impl fmt::Debug for ManualAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualAnimator")
            .field("start_progress", &self.start_progress)
            .field("interpolator", &self.interpolator.name())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
