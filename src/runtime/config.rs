use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::runtime::{
    error::{INVALID_CONFIG, RuntimeError},
    value_sequence::DEFAULT_CAPACITY,
};

pub const DEFAULT_ALL_SELECTOR: &str = "ALL";

/// Engine settings.
///
/// Every field has a default, so a config file only names what it changes:
///
/// ```json
/// { "all_selector": "*" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial capacity of sequences the engine builds.
    pub sequence_capacity: usize,
    /// Atom that makes `advise`/`unadvise` target every installed function.
    pub all_selector: String,
    /// Whether calls made by advice actions go through advice themselves.
    pub advise_inside_advice: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sequence_capacity: DEFAULT_CAPACITY,
            all_selector: DEFAULT_ALL_SELECTOR.to_string(),
            advise_inside_advice: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, RuntimeError> {
        serde_json::from_str(text).map_err(|err| {
            RuntimeError::callee(
                "EngineConfig::from_json",
                INVALID_CONFIG,
                format!("invalid engine config: {}", err),
            )
        })
    }

    pub fn load(path: &Path) -> Result<Self, RuntimeError> {
        let text = fs::read_to_string(path).map_err(|err| {
            RuntimeError::callee(
                "EngineConfig::load",
                INVALID_CONFIG,
                format!("failed to read `{}`: {}", path.display(), err),
            )
        })?;
        Self::from_json(&text)
    }
}
