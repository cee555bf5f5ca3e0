//! Multi-series diff processor.

use std::sync::Arc;

use super::state::DiffState;
use crate::data::Series;

/// Owns the committed dataset and its diff against the previous one.
///
/// `set_entries` rebases on the last committed target, so consecutive
/// updates always animate from where the previous transition was heading.
/// `progress_diff` is a pure read and may be called any number of times per
/// committed state.
#[derive(Debug, Clone, Default)]
pub struct DiffProcessor {
    state: Arc<DiffState>,
    target: Vec<Series>,
}

impl DiffProcessor {
    /// Processor with nothing committed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `new`, diffing it against the previously committed target.
    pub fn set_entries(&mut self, new: Vec<Series>) {
        let old = std::mem::take(&mut self.target);
        self.set_entries_between(&old, new);
    }

    /// Commit `new`, diffing it against an explicit `old` dataset.
    pub fn set_entries_between(&mut self, old: &[Series], new: Vec<Series>) {
        self.state = Arc::new(DiffState::between(old, &new));
        log::debug!(
            "diff committed: {} -> {} series",
            old.len(),
            new.len()
        );
        self.target = new;
    }

    /// Interpolated dataset at `progress`.
    ///
    /// One entry per key in ascending key order, for every series index.
    /// Entries that only exist in the old dataset are omitted once
    /// `progress >= 1.0`. Progress is not clamped.
    #[must_use]
    pub fn progress_diff(&self, progress: f32) -> Vec<Series> {
        self.state.materialize(progress)
    }

    /// The last committed target dataset.
    #[must_use]
    pub fn snapshot(&self) -> &[Series] {
        &self.target
    }

    /// The current diff state.
    #[must_use]
    pub fn state(&self) -> &Arc<DiffState> {
        &self.state
    }

    /// Forget both the diff state and the committed target.
    pub fn clear(&mut self) {
        self.state = Arc::new(DiffState::empty());
        self.target.clear();
    }
}
