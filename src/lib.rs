// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated transitions between successive chart datasets.
//!
//! A chart commits a new list of series; the crate pairs entries by key with
//! the previously committed list and produces interpolated intermediate
//! datasets for any progress value in `[0, 1]`, which an animator drives over
//! time. Entries that appear grow from zero, entries that disappear shrink to
//! zero and are dropped when the transition completes.
//!
//! # Key entry points
//!
//! - [`diff::DiffProcessor`] - keyed multi-series diff and interpolation
//! - [`diff::PieDiffProcessor`] - single unkeyed series matched by position
//! - [`animation::Animator`] - progress driver abstraction with frame-driven,
//!   timer-driven and manually stepped implementations
//! - [`controller::TransitionController`] - commits data and publishes frames
//! - [`options::TransitionOptions`] - TOML-backed timing configuration
//!
//! # Concurrency
//!
//! The diff engine never spawns threads. Each commit builds an immutable
//! [`diff::DiffState`] behind an `Arc`, so interpolation reads a consistent
//! snapshot. [`diff::SharedDiffProcessor`] guards the swap with a mutex;
//! [`diff::diff_channel`] hands states from one writer thread to one reader
//! thread through a lock-free triple buffer.

pub mod animation;
pub mod controller;
pub mod data;
pub mod diff;
pub mod error;
pub mod options;
pub mod util;

pub use controller::TransitionController;
pub use data::{Entry, EntryKey, Series};
pub use diff::{DiffProcessor, PieDiffProcessor, SharedDiffProcessor};
pub use error::TransitionError;
