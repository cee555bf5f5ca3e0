//! Single-series diff processor for unkeyed data such as pie slices.

use super::processor::DiffProcessor;
use crate::data::Series;

/// Diff processor over exactly one unkeyed series.
///
/// Values are matched by ordinal position: slice `i` of the old dataset
/// animates into slice `i` of the new one. When the new dataset is shorter,
/// the trailing slices shrink to zero and are dropped at completion.
#[derive(Debug, Clone, Default)]
pub struct PieDiffProcessor {
    inner: DiffProcessor,
}

impl PieDiffProcessor {
    /// Processor with nothing committed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit new slice values, rebasing on the previous target.
    pub fn set_values(&mut self, values: &[f32]) {
        self.set_entries(Series::from_values(values.iter().copied()));
    }

    /// Commit new slice values against explicit old values.
    pub fn set_values_between(&mut self, old: &[f32], new: &[f32]) {
        self.inner.set_entries_between(
            &[Series::from_values(old.iter().copied())],
            vec![Series::from_values(new.iter().copied())],
        );
    }

    /// Commit a prepared series, rebasing on the previous target.
    pub fn set_entries(&mut self, series: Series) {
        self.inner.set_entries(vec![series]);
    }

    /// Interpolated series at `progress`; empty before the first commit.
    #[must_use]
    pub fn progress_diff(&self, progress: f32) -> Series {
        self.inner
            .progress_diff(progress)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Interpolated slice values at `progress`.
    #[must_use]
    pub fn progress_values(&self, progress: f32) -> Vec<f32> {
        self.progress_diff(progress).values().collect()
    }

    /// The last committed series, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Series> {
        self.inner.snapshot().first()
    }
}
