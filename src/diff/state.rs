//! Per-key diff state between two committed snapshots.

use std::collections::BTreeMap;

use crate::animation::interpolation::lerp;
use crate::data::{Entry, EntryKey, Series};

/// Old and new value of one key across a snapshot pair.
///
/// A missing old value means the entry is appearing and grows from zero; a
/// missing new value means it is disappearing (temporary) and shrinks to
/// zero, then is dropped once progress reaches 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressEntry {
    /// Value in the old snapshot.
    pub old_value: Option<f32>,
    /// Value in the new snapshot.
    pub new_value: Option<f32>,
}

impl ProgressEntry {
    /// Entry present only in the new snapshot.
    #[must_use]
    pub const fn appearing(new_value: f32) -> Self {
        Self {
            old_value: None,
            new_value: Some(new_value),
        }
    }

    /// Entry present only in the old snapshot.
    #[must_use]
    pub const fn disappearing(old_value: f32) -> Self {
        Self {
            old_value: Some(old_value),
            new_value: None,
        }
    }

    /// Whether the entry is removed when the transition completes.
    #[must_use]
    pub const fn is_temporary(self) -> bool {
        self.new_value.is_none()
    }

    /// Whether the entry is part of the output at `progress`.
    #[must_use]
    pub fn is_visible_at(self, progress: f32) -> bool {
        !(self.is_temporary() && progress >= 1.0)
    }

    /// Interpolated value at `progress`, treating absent sides as zero.
    #[must_use]
    pub fn value_at(self, progress: f32) -> f32 {
        lerp(
            self.old_value.unwrap_or(0.0),
            self.new_value.unwrap_or(0.0),
            progress,
        )
    }
}

/// Ordered key → [`ProgressEntry`] map for one series index.
pub type SeriesDiff = BTreeMap<EntryKey, ProgressEntry>;

/// Immutable diff of every series index between two snapshots.
///
/// For each index `i`, the key set is the union of the keys in `old[i]` and
/// `new[i]`; a series missing on either side counts as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffState {
    series: Vec<SeriesDiff>,
}

impl DiffState {
    /// State with no series. Materializes to an empty list.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Diff `old` against `new`, index by index.
    ///
    /// Duplicate keys within one input series keep the last entry.
    #[must_use]
    pub fn between(old: &[Series], new: &[Series]) -> Self {
        let count = old.len().max(new.len());
        let series = (0..count)
            .map(|i| diff_series(old.get(i), new.get(i)))
            .collect();
        Self { series }
    }

    /// Number of series indices.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Whether the state holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Diff of the series at `index`.
    #[must_use]
    pub fn series(&self, index: usize) -> Option<&SeriesDiff> {
        self.series.get(index)
    }

    /// Interpolated dataset at `progress`.
    #[must_use]
    pub fn materialize(&self, progress: f32) -> Vec<Series> {
        self.series
            .iter()
            .map(|diff| materialize_series(diff, progress))
            .collect()
    }
}

fn diff_series(old: Option<&Series>, new: Option<&Series>) -> SeriesDiff {
    let mut diff = SeriesDiff::new();
    for entry in old.map_or(&[][..], Series::entries) {
        let _ = diff.insert(
            entry.ordered_key(),
            ProgressEntry::disappearing(entry.value()),
        );
    }
    for entry in new.map_or(&[][..], Series::entries) {
        diff.entry(entry.ordered_key()).or_default().new_value =
            Some(entry.value());
    }
    diff
}

fn materialize_series(diff: &SeriesDiff, progress: f32) -> Series {
    diff.iter()
        .filter(|(_, entry)| entry.is_visible_at(progress))
        .map(|(key, entry)| Entry::new(key.get(), entry.value_at(progress)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f32, f32)]) -> Series {
        Series::from(points.to_vec())
    }

    #[test]
    fn key_set_is_union_of_both_sides() {
        let old = [series(&[(0.0, 2.0), (2.0, 2.0)])];
        let new = [series(&[(1.0, 1.0), (2.0, 4.0)])];
        let state = DiffState::between(&old, &new);

        let diff = state.series(0).unwrap();
        let keys: Vec<f32> = diff.keys().map(|k| k.get()).collect();
        assert_eq!(keys, vec![0.0, 1.0, 2.0]);
        assert_eq!(
            diff[&EntryKey::new(0.0)],
            ProgressEntry::disappearing(2.0)
        );
        assert_eq!(diff[&EntryKey::new(1.0)], ProgressEntry::appearing(1.0));
        assert_eq!(
            diff[&EntryKey::new(2.0)],
            ProgressEntry {
                old_value: Some(2.0),
                new_value: Some(4.0),
            }
        );
    }

    #[test]
    fn misaligned_series_counts_are_padded() {
        let old = [series(&[(0.0, 1.0)])];
        let new = [series(&[(0.0, 3.0)]), series(&[(5.0, 5.0)])];
        let state = DiffState::between(&old, &new);
        assert_eq!(state.series_count(), 2);

        let frame = state.materialize(0.0);
        assert_eq!(frame[1], series(&[(5.0, 0.0)]));

        let shrunk = DiffState::between(&new, &old);
        assert_eq!(shrunk.materialize(1.0)[1], Series::default());
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let old = [series(&[(1.0, 4.0), (1.0, 8.0)])];
        let new = [series(&[(1.0, 0.0), (1.0, 2.0)])];
        let state = DiffState::between(&old, &new);
        let frame = state.materialize(0.5);
        assert_eq!(frame[0], series(&[(1.0, 5.0)]));
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let new = [series(&[(3.0, 1.0), (-1.0, 1.0), (2.0, 1.0)])];
        let state = DiffState::between(&[], &new);
        let frame = state.materialize(1.0);
        assert!(frame[0].is_sorted_by_key());
        assert_eq!(frame[0].keys().collect::<Vec<_>>(), vec![-1.0, 2.0, 3.0]);
    }

    #[test]
    fn temporary_entries_drop_at_and_past_completion() {
        let entry = ProgressEntry::disappearing(4.0);
        assert!(entry.is_visible_at(0.999));
        assert!(!entry.is_visible_at(1.0));
        assert!(!entry.is_visible_at(1.02));
        assert!(ProgressEntry::appearing(4.0).is_visible_at(1.5));
    }

    #[test]
    fn empty_state_materializes_to_nothing() {
        assert!(DiffState::empty().materialize(0.5).is_empty());
        assert!(DiffState::empty().is_empty());
    }
}
