//! Error types for definition registration and loading

use crate::definition::ItemKey;
use std::path::PathBuf;
use thiserror::Error;

/// A definition failed the registration rules
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Registry key is empty
    #[error("Definition has no registry key")]
    MissingKey,
    /// Category is the `None` sentinel
    #[error("Definition has no item category")]
    NoCategory,
    /// Kind is the `None` sentinel
    #[error("Definition has no item kind")]
    NoKind,
    /// Stackable with a zero stack limit
    #[error("Stackable definition has invalid stack size {max_stack_size}")]
    InvalidStackSize { max_stack_size: u32 },
    /// Equippable without tool, weapon or armor type
    #[error("Equippable definition has no equipment type")]
    NoEquipmentType,
    /// Field that must be a finite, non-negative number
    #[error("Field '{field}' must be a non-negative number, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
}

/// Registration failures. The registry is left unchanged for the key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Item '{key}' rejected: {source}")]
    Validation {
        key: ItemKey,
        #[source]
        source: ValidationError,
    },
    #[error("Item '{0}' is already registered")]
    DuplicateKey(ItemKey),
}

impl RegistryError {
    /// Key of the rejected definition
    pub fn key(&self) -> &ItemKey {
        match self {
            Self::Validation { key, .. } => key,
            Self::DuplicateKey(key) => key,
        }
    }
}

/// Failure to resolve a deferred definition
#[derive(Debug, Error)]
pub enum LoadError {
    /// Asset not found
    #[error("Definition asset not found: {0}")]
    NotFound(PathBuf),
    /// IO error
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Row could not be decoded
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },
    /// Reference leaves the content root
    #[error("Definition reference escapes the content root: {0}")]
    InvalidReference(String),
    /// No loader for this asset type
    #[error("Unsupported definition format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for definition loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Registry configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
