//! Single `(key, value)` data points and their ordered key type.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Totally ordered key of an [`Entry`] within its series.
///
/// Keys are matched by exact `f32` value, so x coordinates must be
/// reproduced bit-for-bit between snapshots to be paired up. `-0.0` folds
/// into `0.0`, and NaN sorts after every other key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey(OrderedFloat<f32>);

impl EntryKey {
    /// Key for the given x coordinate or ordinal index.
    #[must_use]
    pub fn new(key: f32) -> Self {
        let key = if key == 0.0 { 0.0 } else { key };
        Self(OrderedFloat(key))
    }

    /// The raw key value.
    #[must_use]
    pub fn get(self) -> f32 {
        self.0.into_inner()
    }
}

impl From<f32> for EntryKey {
    fn from(key: f32) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Immutable data point: a key (x coordinate or ordinal index) and a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    key: f32,
    value: f32,
}

impl Entry {
    /// Data point at `key` with `value`.
    #[must_use]
    pub const fn new(key: f32, value: f32) -> Self {
        Self { key, value }
    }

    /// X coordinate, or ordinal index for unkeyed series.
    #[must_use]
    pub const fn key(self) -> f32 {
        self.key
    }

    /// Key in its totally ordered form.
    #[must_use]
    pub fn ordered_key(self) -> EntryKey {
        EntryKey::new(self.key)
    }

    /// Y value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.value
    }
}

impl From<(f32, f32)> for Entry {
    fn from((key, value): (f32, f32)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_matches_zero() {
        assert_eq!(EntryKey::new(-0.0), EntryKey::new(0.0));
        assert_eq!(EntryKey::new(-0.0).get().to_bits(), 0.0f32.to_bits());
    }

    #[test]
    fn keys_order_numerically() {
        let mut keys = vec![
            EntryKey::new(3.0),
            EntryKey::new(-1.5),
            EntryKey::new(f32::NAN),
            EntryKey::new(0.25),
        ];
        keys.sort();
        assert_eq!(keys[0].get(), -1.5);
        assert_eq!(keys[1].get(), 0.25);
        assert_eq!(keys[2].get(), 3.0);
        assert!(keys[3].get().is_nan());
    }

    #[test]
    fn entry_from_tuple() {
        let entry = Entry::from((2.0, 7.5));
        assert_eq!(entry.key(), 2.0);
        assert_eq!(entry.value(), 7.5);
        assert_eq!(entry.ordered_key(), EntryKey::new(2.0));
    }

    #[test]
    fn entry_serializes_as_struct() {
        let json = serde_json::to_string(&Entry::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"key":1.0,"value":2.0}"#);
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Entry::new(1.0, 2.0));
    }
}
