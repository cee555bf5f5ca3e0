//! Transition options with TOML file support.
//!
//! Options serialize to/from TOML so hosts can ship presets alongside their
//! chart configuration. All sub-structs use `#[serde(default)]`, so partial
//! files only need the keys they override.

mod animation;

use std::path::Path;

pub use animation::AnimationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct TransitionOptions {
    /// Animation timing and curve.
    pub animation: AnimationOptions,
}

impl TransitionOptions {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(TransitionOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TransitionError> {
        toml::from_str(content)
            .map_err(|e| TransitionError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TransitionError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&content)?;
        log::debug!("loaded transition options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TransitionError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TransitionError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(TransitionError::Io)
    }
}
