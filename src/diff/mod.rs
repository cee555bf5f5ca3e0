//! Incremental diff engine.
//!
//! Given the previous and newly committed datasets, the engine pairs up
//! entries by key and materializes interpolated datasets for any progress
//! value. Entries that appear grow from zero; entries that disappear shrink
//! to zero and are dropped once progress reaches 1.0.
//!
//! - [`DiffProcessor`] - owned, single-threaded multi-series processor
//! - [`PieDiffProcessor`] - one unkeyed series matched by position
//! - [`SharedDiffProcessor`] - mutex-guarded handle with commit listeners
//! - [`diff_channel`] - lock-free writer/reader split over a triple buffer

mod buffer;
mod pie;
mod processor;
mod shared;
mod state;

pub use buffer::{diff_channel, DiffReader, DiffWriter};
pub use pie::PieDiffProcessor;
pub use processor::DiffProcessor;
pub use shared::{CommitListener, SharedDiffProcessor, SubscriptionId};
pub use state::{DiffState, ProgressEntry, SeriesDiff};
