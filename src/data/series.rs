//! Ordered collections of entries sharing one key domain.

use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryKey};

/// An ordered sequence of [`Entry`] values, e.g. one line or one column
/// group of a chart.
///
/// Entries are kept in the order they were given. Keys are expected to be
/// unique; when they are not, the diff engine keeps the last entry for a
/// key. Series produced by the diff engine are always sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    entries: Vec<Entry>,
}

impl Series {
    /// Series over the given entries.
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Unkeyed series: each value is keyed by its ordinal position.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Entry::new(index as f32, value))
            .collect()
    }

    /// Entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Consume the series, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in stored order.
    pub fn keys(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|e| e.key())
    }

    /// Values in stored order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|e| e.value())
    }

    /// Value stored for `key` (last one wins on duplicates).
    #[must_use]
    pub fn value_at(&self, key: f32) -> Option<f32> {
        let key = EntryKey::new(key);
        self.entries
            .iter()
            .rev()
            .find(|e| e.ordered_key() == key)
            .map(|e| e.value())
    }

    /// Whether entries are in strictly ascending key order.
    #[must_use]
    pub fn is_sorted_by_key(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].ordered_key() < pair[1].ordered_key())
    }
}

impl FromIterator<Entry> for Series {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Entry>> for Series {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

impl From<Vec<(f32, f32)>> for Series {
    fn from(points: Vec<(f32, f32)>) -> Self {
        points.into_iter().map(Entry::from).collect()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
