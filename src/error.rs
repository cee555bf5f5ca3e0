//! Crate-level error types.
//!
//! The diff engine itself never fails; these errors only cover the
//! surrounding configuration, snapshot loading, and thread plumbing.

use std::fmt;

/// Errors produced by the chart-transition crate.
#[derive(Debug)]
pub enum TransitionError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A JSON chart snapshot could not be parsed.
    SnapshotParse(String),
    /// Invalid command-line usage.
    Usage(String),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::SnapshotParse(msg) => {
                write!(f, "snapshot parse error: {msg}")
            }
            Self::Usage(msg) => write!(f, "usage: {msg}"),
        }
    }
}

impl std::error::Error for TransitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TransitionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TransitionError {
    fn from(e: serde_json::Error) -> Self {
        Self::SnapshotParse(e.to_string())
    }
}
