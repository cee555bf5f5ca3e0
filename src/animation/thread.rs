//! Timer-driven animator running on a background thread.
//!
//! Each run owns a worker thread that wakes at the configured frame rate,
//! computes eased progress, and invokes the callback under the run's lock.
//! Cancelling from another thread takes that lock, so it waits for an
//! in-flight callback and guarantees nothing is delivered afterwards.
//! Cancelling from inside the callback only raises the flag; the worker
//! checks it before every delivery.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread::{self, ThreadId};

use web_time::{Duration, Instant};

use super::animator::{Animator, AnimatorState, ProgressCallback};
use super::interpolation::{shared, SharedInterpolator};
use super::runner::AnimationRunner;
use crate::error::TransitionError;
use crate::util::easing::EasingFunction;
use crate::util::frame_timing::FrameTiming;

/// State shared between an animator handle and one worker thread.
struct RunShared {
    cancelled: AtomicBool,
    finished: AtomicBool,
    worker: OnceLock<ThreadId>,
    on_progress: Mutex<Option<ProgressCallback>>,
}

impl RunShared {
    fn new(on_progress: ProgressCallback) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            worker: OnceLock::new(),
            on_progress: Mutex::new(Some(on_progress)),
        }
    }

    fn callback(&self) -> MutexGuard<'_, Option<ProgressCallback>> {
        self.on_progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Invoke the callback unless the run was cancelled.
    fn deliver(&self, progress: f32) -> bool {
        let mut slot = self.callback();
        if self.cancelled.load(Ordering::Acquire) {
            return false;
        }
        match slot.as_mut() {
            Some(on_progress) => {
                on_progress(progress);
                true
            }
            None => false,
        }
    }

    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        let on_worker = self
            .worker
            .get()
            .is_some_and(|id| *id == thread::current().id());
        if !on_worker {
            // Blocks until an in-flight callback returns.
            let _ = self.callback().take();
        }
    }

    fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::Acquire)
            && !self.finished.load(Ordering::Acquire)
    }
}

/// Cancels one run of a [`ThreadAnimator`] without borrowing the animator.
///
/// Safe to call from inside the progress callback.
#[derive(Clone)]
pub struct CancelHandle {
    run: Arc<RunShared>,
}

impl CancelHandle {
    /// Cancel the run this handle belongs to.
    pub fn cancel(&self) {
        self.run.cancel();
    }

    /// Whether the run has been cancelled or has finished.
    #[must_use]
    pub fn is_done(&self) -> bool {
        !self.run.is_live()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("done", &self.is_done())
            .finish()
    }
}

/// Animator that ticks on a dedicated background thread.
pub struct ThreadAnimator {
    duration: Duration,
    interpolator: SharedInterpolator,
    frame_rate: u32,
    run: Option<Arc<RunShared>>,
}

impl ThreadAnimator {
    /// Animator with the standard 300ms cubic hermite ease-out at 60 fps.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timing(
            Duration::from_millis(300),
            shared(EasingFunction::DEFAULT),
            60,
        )
    }

    /// Animator with explicit duration, curve and tick rate.
    #[must_use]
    pub fn with_timing(
        duration: Duration,
        interpolator: SharedInterpolator,
        frame_rate: u32,
    ) -> Self {
        Self {
            duration,
            interpolator,
            frame_rate,
            run: None,
        }
    }

    /// Tick rate of subsequent runs.
    #[must_use]
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Set the tick rate of subsequent runs.
    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        self.frame_rate = frame_rate;
    }

    /// Handle that cancels the current run, if one is active.
    #[must_use]
    pub fn cancel_handle(&self) -> Option<CancelHandle> {
        self.run.as_ref().map(|run| CancelHandle {
            run: Arc::clone(run),
        })
    }

    fn run_loop(run: &RunShared, runner: &AnimationRunner, mut timing: FrameTiming) {
        let _ = run.worker.set(thread::current().id());
        loop {
            thread::sleep(timing.interval());
            if run.cancelled.load(Ordering::Acquire) {
                break;
            }
            let now = Instant::now();
            timing.end_frame(now);
            let raw_t = runner.progress(now);
            if !run.deliver(runner.eased_t(raw_t)) || raw_t >= 1.0 {
                break;
            }
        }
        run.finished.store(true, Ordering::Release);
        log::debug!(
            "animator run ended after {:?} at {:.1} fps",
            runner.duration(),
            timing.fps()
        );
    }
}

impl Default for ThreadAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for ThreadAnimator {
    fn start(&mut self, mut on_progress: ProgressCallback) {
        self.cancel();

        let runner = AnimationRunner::new(self.duration, self.interpolator.clone());
        on_progress(runner.eased_t(0.0));

        let run = Arc::new(RunShared::new(on_progress));
        let worker_run = Arc::clone(&run);
        let timing = FrameTiming::new(self.frame_rate);
        let spawned = thread::Builder::new()
            .name("chart-animator".into())
            .spawn(move || Self::run_loop(&worker_run, &runner, timing));

        if let Err(e) = spawned {
            log::error!("{}", TransitionError::ThreadSpawn(e));
            // Without a clock the only safe place to leave the chart is the target.
            let _ = run.deliver(1.0);
            run.finished.store(true, Ordering::Release);
        }
        self.run = Some(run);
    }

    fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            run.cancel();
        }
    }

    fn state(&self) -> AnimatorState {
        match &self.run {
            Some(run) if run.is_live() => AnimatorState::Running,
            _ => AnimatorState::Idle,
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

impl Drop for ThreadAnimator {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for ThreadAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadAnimator")
            .field("duration", &self.duration)
            .field("interpolator", &self.interpolator.name())
            .field("frame_rate", &self.frame_rate)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn linear(duration: Duration, frame_rate: u32) -> ThreadAnimator {
        ThreadAnimator::with_timing(
            duration,
            shared(EasingFunction::Linear),
            frame_rate,
        )
    }

    fn wait_until_idle(animator: &ThreadAnimator) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while animator.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn runs_to_completion() {
        let mut animator = linear(Duration::from_millis(40), 200);
        let (tx, rx) = mpsc::channel();
        animator.start(Box::new(move |p| {
            let _ = tx.send(p);
        }));

        wait_until_idle(&animator);
        let seen: Vec<f32> = rx.try_iter().collect();
        assert_eq!(seen.first().copied(), Some(0.0));
        assert_eq!(seen.last().copied(), Some(1.0));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn cancel_stops_delivery_while_clock_advances() {
        let mut animator = linear(Duration::from_secs(60), 100);
        let (tx, rx) = mpsc::channel();
        animator.start(Box::new(move |p| {
            let _ = tx.send(p);
        }));

        // Wait for the first scheduled tick after the synchronous one.
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first, 0.0);
        let _ = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        animator.cancel();
        assert_eq!(animator.state(), AnimatorState::Idle);
        let _: Vec<f32> = rx.try_iter().collect();

        thread::sleep(Duration::from_millis(100));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn callback_can_cancel_its_own_run() {
        let mut animator = linear(Duration::from_secs(60), 200);
        let handle_slot: Arc<Mutex<Option<CancelHandle>>> =
            Arc::new(Mutex::new(None));
        let slot = Arc::clone(&handle_slot);
        let (tx, rx) = mpsc::channel();
        animator.start(Box::new(move |p| {
            let _ = tx.send(p);
            if p > 0.0 {
                if let Some(handle) = slot.lock().unwrap().as_ref() {
                    handle.cancel();
                }
            }
        }));
        *handle_slot.lock().unwrap() = animator.cancel_handle();

        let deadline = Instant::now() + Duration::from_secs(5);
        while animator.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(animator.state(), AnimatorState::Idle);
        let seen: Vec<f32> = rx.try_iter().collect();
        assert!(seen.len() >= 2);
        assert!(seen.iter().all(|p| *p < 1.0));

        thread::sleep(Duration::from_millis(50));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn double_cancel_and_idle_cancel_are_noops() {
        let mut animator = ThreadAnimator::new();
        animator.cancel();
        animator.start(Box::new(|_| {}));
        animator.cancel();
        animator.cancel();
        assert!(!animator.is_running());
    }

    #[test]
    fn restart_silences_previous_run() {
        let mut animator = linear(Duration::from_secs(60), 200);
        let (old_tx, old_rx) = mpsc::channel();
        animator.start(Box::new(move |p| {
            let _ = old_tx.send(p);
        }));
        animator.start(Box::new(|_| {}));
        let _: Vec<f32> = old_rx.try_iter().collect();

        thread::sleep(Duration::from_millis(50));
        assert!(old_rx.try_recv().is_err());
        assert!(animator.is_running());
    }
}
