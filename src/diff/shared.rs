//! Thread-safe diff processor handle with commit listeners.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use super::processor::DiffProcessor;
use super::state::DiffState;
use crate::data::Series;

/// Callback invoked with the committed target after every commit.
pub type CommitListener = Arc<dyn Fn(&[Series]) + Send + Sync>;

/// Identifies a registered [`CommitListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Inner {
    processor: DiffProcessor,
    listeners: FxHashMap<SubscriptionId, CommitListener>,
    next_id: u64,
    commits: u64,
}

/// Sequence number of the last commit whose listeners were notified.
#[derive(Default)]
struct Dispatch {
    delivered: u64,
}

/// Cloneable handle to a [`DiffProcessor`] shared between a data-producing
/// thread and a rendering thread.
///
/// The lock only covers swapping the `Arc<DiffState>`; interpolation runs on
/// a cloned snapshot outside it, so readers never wait on a materialization.
/// Listeners are stored under the same lock and invoked after it is
/// released, so they may read back from the processor.
///
/// Notifications are serialized in commit order. When commits race, a
/// notification overtaken by a newer one is skipped, so the last target a
/// listener sees is always the committed one. Listeners must not commit to
/// the processor that notifies them.
#[derive(Clone)]
pub struct SharedDiffProcessor {
    inner: Arc<Mutex<Inner>>,
    dispatch: Arc<Mutex<Dispatch>>,
}

impl SharedDiffProcessor {
    /// Shared processor with nothing committed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_processor(DiffProcessor::new())
    }

    /// Wrap an existing processor.
    #[must_use]
    pub fn from_processor(processor: DiffProcessor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                processor,
                listeners: FxHashMap::default(),
                next_id: 0,
                commits: 0,
            })),
            dispatch: Arc::new(Mutex::new(Dispatch::default())),
        }
    }

    /// Commit `new`, rebasing on the previously committed target.
    pub fn set_entries(&self, new: Vec<Series>) {
        self.commit(|processor| processor.set_entries(new));
    }

    /// Commit `new`, diffing it against an explicit `old` dataset.
    pub fn set_entries_between(&self, old: &[Series], new: Vec<Series>) {
        self.commit(|processor| processor.set_entries_between(old, new));
    }

    /// Interpolated dataset at `progress`.
    #[must_use]
    pub fn progress_diff(&self, progress: f32) -> Vec<Series> {
        self.state().materialize(progress)
    }

    /// Consistent snapshot of the current diff state.
    #[must_use]
    pub fn state(&self) -> Arc<DiffState> {
        Arc::clone(self.lock().processor.state())
    }

    /// Copy of the last committed target dataset.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Series> {
        self.lock().processor.snapshot().to_vec()
    }

    /// Register a listener notified after every commit.
    #[must_use]
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Series]) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        let _ = inner.listeners.insert(id, Arc::new(listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    #[must_use]
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().listeners.remove(&id).is_some()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn commit(&self, apply: impl FnOnce(&mut DiffProcessor)) {
        let (sequence, target, mut listeners) = {
            let mut inner = self.lock();
            apply(&mut inner.processor);
            inner.commits += 1;
            if inner.listeners.is_empty() {
                return;
            }
            let listeners: Vec<(SubscriptionId, CommitListener)> = inner
                .listeners
                .iter()
                .map(|(id, listener)| (*id, Arc::clone(listener)))
                .collect();
            (inner.commits, inner.processor.snapshot().to_vec(), listeners)
        };

        let mut dispatch = self
            .dispatch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if sequence < dispatch.delivered {
            log::debug!("skipping notification for superseded commit {sequence}");
            return;
        }
        dispatch.delivered = sequence;
        listeners.sort_by_key(|(id, _)| *id);
        for (_, listener) in listeners {
            listener(&target);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("diff processor lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl Default for SharedDiffProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedDiffProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("SharedDiffProcessor")
            .field("series", &inner.processor.state().series_count())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
