//! Chart data points and series.
//!
//! A chart dataset is a `Vec<Series>` of index-aligned series; a pie dataset
//! is a single unkeyed [`Series`] whose keys are ordinal positions.

mod entry;
mod series;

pub use entry::{Entry, EntryKey};
pub use series::Series;
