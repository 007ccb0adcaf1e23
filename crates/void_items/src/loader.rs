//! Definition loading
//!
//! The registry only needs one capability from the asset side: turn deferred
//! references into definitions, each one succeeding or failing on its own.
//! Loaders that resolve off-thread hand their results to
//! [`ItemRegistry::initialize_with`](crate::ItemRegistry::initialize_with).

use crate::config::RegistryConfig;
use crate::definition::{ItemDefinition, ItemKey};
use crate::error::{LoadError, LoadResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Deferred reference to a definition asset (a path relative to the content root)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionRef(String);

impl DefinitionRef {
    /// Create a new reference
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the reference path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get file extension
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.0).extension().and_then(|e| e.to_str())
    }
}

impl fmt::Display for DefinitionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DefinitionRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DefinitionRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Resolves deferred references into definitions
pub trait DefinitionLoader: Send + Sync {
    /// Resolve one reference
    fn load(&self, reference: &DefinitionRef) -> LoadResult<ItemDefinition>;

    /// Resolve every reference; a failure affects only its own entry
    fn load_all(
        &self,
        references: &[DefinitionRef],
    ) -> Vec<(DefinitionRef, LoadResult<ItemDefinition>)> {
        references
            .iter()
            .map(|reference| (reference.clone(), self.load(reference)))
            .collect()
    }
}

/// Loads `.json` definition rows from a content directory
#[derive(Debug, Clone)]
pub struct JsonDefinitionLoader {
    root: PathBuf,
}

impl JsonDefinitionLoader {
    /// Create a loader rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a loader rooted at the configured content root
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.content_root.clone())
    }

    /// Content root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `reference` onto the root. Absolute paths and `..` are refused.
    fn resolve_path(&self, reference: &DefinitionRef) -> LoadResult<PathBuf> {
        let relative = Path::new(reference.as_str());
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(LoadError::InvalidReference(reference.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl DefinitionLoader for JsonDefinitionLoader {
    fn load(&self, reference: &DefinitionRef) -> LoadResult<ItemDefinition> {
        let is_json = reference
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(LoadError::UnsupportedFormat(reference.to_string()));
        }

        let path = self.resolve_path(reference)?;
        let text = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.clone())
            } else {
                LoadError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        parse_row(&text, reference.as_str())
    }
}

/// In-memory loader for tools and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryDefinitionLoader {
    definitions: HashMap<DefinitionRef, ItemDefinition>,
}

impl MemoryDefinitionLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition under `reference`
    pub fn with(mut self, reference: impl Into<DefinitionRef>, definition: ItemDefinition) -> Self {
        self.insert(reference, definition);
        self
    }

    /// Add a definition under `reference`
    pub fn insert(&mut self, reference: impl Into<DefinitionRef>, definition: ItemDefinition) {
        self.definitions.insert(reference.into(), definition);
    }
}

impl DefinitionLoader for MemoryDefinitionLoader {
    fn load(&self, reference: &DefinitionRef) -> LoadResult<ItemDefinition> {
        self.definitions
            .get(reference)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(PathBuf::from(reference.as_str())))
    }
}

/// Decode a single definition row
pub fn parse_row(text: &str, source: &str) -> LoadResult<ItemDefinition> {
    serde_json::from_str(text).map_err(|e| LoadError::Parse {
        path: source.to_string(),
        message: e.to_string(),
    })
}

/// Decode a data table.
///
/// Accepts either an array of rows or an object mapping row key to row (a row
/// without its own `key` takes the map key). The outer `Err` means the table
/// itself is unreadable; each row then succeeds or fails independently.
pub fn parse_table(text: &str, source: &str) -> LoadResult<Vec<LoadResult<ItemDefinition>>> {
    let table: Value = serde_json::from_str(text).map_err(|e| LoadError::Parse {
        path: source.to_string(),
        message: e.to_string(),
    })?;

    let rows: Vec<(String, Value)> = match table {
        Value::Array(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| (format!("{}[{}]", source, index), row))
            .collect(),
        Value::Object(rows) => rows
            .into_iter()
            .map(|(key, mut row)| {
                if let Value::Object(fields) = &mut row {
                    fields
                        .entry("key")
                        .or_insert_with(|| Value::String(key.clone()));
                }
                (format!("{}[{}]", source, key), row)
            })
            .collect(),
        _ => {
            return Err(LoadError::Parse {
                path: source.to_string(),
                message: "expected an array or object of rows".to_string(),
            })
        }
    };

    Ok(rows
        .into_iter()
        .map(|(path, row)| {
            serde_json::from_value::<ItemDefinition>(row)
                .map_err(|e| LoadError::Parse {
                    path,
                    message: e.to_string(),
                })
        })
        .collect())
}

/// Keys of every row that decoded successfully
pub fn table_keys(rows: &[LoadResult<ItemDefinition>]) -> Vec<ItemKey> {
    rows.iter()
        .filter_map(|row| row.as_ref().ok())
        .map(|def| def.key.clone())
        .collect()
}
