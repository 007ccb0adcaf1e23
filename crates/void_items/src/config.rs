//! Registry configuration

use crate::error::ConfigError;
use crate::loader::DefinitionRef;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Startup configuration for an [`ItemRegistry`](crate::ItemRegistry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory deferred references are resolved against
    pub content_root: PathBuf,
    /// Definitions loaded by `initialize`
    pub default_items: Vec<DefinitionRef>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content/items"),
            default_items: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Parse from a JSON string
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
