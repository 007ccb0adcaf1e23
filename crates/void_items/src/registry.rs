//! Item definition registry
//!
//! Owns every definition by key and is the only factory for instances.
//!
//! Mutation (`initialize`, `register`) takes `&mut self`, so the borrow checker
//! enforces a single writer. Once populated the registry can be shared (e.g. in
//! an `Arc`) and every lookup and `create_instance` call is a pure read.

use crate::config::RegistryConfig;
use crate::definition::{ItemDefinition, ItemKey};
use crate::error::{LoadError, LoadResult, RegistryError};
use crate::event::{RegistryEvent, RegistryEvents};
use crate::instance::ItemInstance;
use crate::item::{ItemCategory, ItemKind};
use crate::loader::{self, DefinitionLoader, DefinitionRef};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Outcome of a bulk load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Keys accepted into the registry
    pub registered: Vec<ItemKey>,
    /// Definitions that loaded but were refused
    pub rejected: Vec<RegistryError>,
    /// References that failed to load
    pub failed: Vec<(DefinitionRef, LoadError)>,
}

impl LoadReport {
    /// True when every entry made it into the registry
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.failed.is_empty()
    }
}

/// Central registry of item definitions
#[derive(Debug, Default)]
pub struct ItemRegistry {
    definitions: HashMap<ItemKey, ItemDefinition>,
    default_items: Vec<DefinitionRef>,
    initialized: bool,
    events: RegistryEvents,
}

impl ItemRegistry {
    /// Create an empty registry with no default items
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose default items come from `config`
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new()
            .with_default_items(config.default_items.iter().cloned())
    }

    /// Add references resolved by `initialize`
    pub fn with_default_items<I, R>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<DefinitionRef>,
    {
        self.default_items.extend(references.into_iter().map(Into::into));
        self
    }

    /// References resolved by `initialize`
    pub fn default_items(&self) -> &[DefinitionRef] {
        &self.default_items
    }

    /// Event dispatcher
    pub fn events(&self) -> &RegistryEvents {
        &self.events
    }

    /// Whether `initialize` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Load and register every default item.
    ///
    /// Clears existing definitions first. Returns `None` without touching
    /// anything if the registry is already initialized.
    pub fn initialize(&mut self, loader: &dyn DefinitionLoader) -> Option<LoadReport> {
        if self.initialized {
            log::debug!("Item registry already initialized, skipping");
            return None;
        }

        let resolved = loader.load_all(&self.default_items);
        self.initialize_with(resolved)
    }

    /// Complete initialization from definitions resolved elsewhere
    pub fn initialize_with<I>(&mut self, resolved: I) -> Option<LoadReport>
    where
        I: IntoIterator<Item = (DefinitionRef, LoadResult<ItemDefinition>)>,
    {
        if self.initialized {
            log::debug!("Item registry already initialized, skipping");
            return None;
        }

        self.definitions.clear();

        let mut report = LoadReport::default();
        for (reference, result) in resolved {
            match result {
                Ok(definition) => self.register_into(definition, &mut report),
                Err(e) => {
                    log::warn!("Failed to load default item {}: {}", reference, e);
                    report.failed.push((reference, e));
                }
            }
        }

        self.initialized = true;
        log::info!(
            "Item registry initialized with {} definitions ({} rejected, {} failed to load)",
            self.definitions.len(),
            report.rejected.len(),
            report.failed.len()
        );
        self.events.emit(RegistryEvent::Initialized);

        Some(report)
    }

    /// Register a definition.
    ///
    /// Invalid definitions and duplicate keys are refused; the first
    /// registration of a key wins.
    pub fn register(&mut self, definition: ItemDefinition) -> Result<(), RegistryError> {
        if let Err(source) = definition.validate() {
            let err = RegistryError::Validation {
                key: definition.key.clone(),
                source,
            };
            log::warn!("{}", err);
            return Err(err);
        }

        let key = definition.key.clone();
        match self.definitions.entry(key.clone()) {
            Entry::Occupied(_) => {
                let err = RegistryError::DuplicateKey(key);
                log::warn!("{}", err);
                return Err(err);
            }
            Entry::Vacant(slot) => {
                slot.insert(definition);
            }
        }

        log::debug!("Registered item '{}'", key);
        self.events.emit(RegistryEvent::DefinitionRegistered { key });
        Ok(())
    }

    /// Register every good row of a JSON data table
    pub fn register_table(&mut self, text: &str, source: &str) -> LoadResult<LoadReport> {
        let rows = loader::parse_table(text, source)?;

        let mut report = LoadReport::default();
        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Ok(definition) => self.register_into(definition, &mut report),
                Err(e) => {
                    log::warn!("Skipping row {} of {}: {}", index, source, e);
                    let reference = DefinitionRef::new(format!("{}[{}]", source, index));
                    report.failed.push((reference, e));
                }
            }
        }
        Ok(report)
    }

    fn register_into(&mut self, definition: ItemDefinition, report: &mut LoadReport) {
        let key = definition.key.clone();
        match self.register(definition) {
            Ok(()) => report.registered.push(key),
            Err(e) => report.rejected.push(e),
        }
    }

    /// Get a definition by key
    pub fn get(&self, key: &str) -> Option<&ItemDefinition> {
        self.definitions.get(key)
    }

    /// Check if a key is registered
    pub fn is_registered(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    /// Create an instance of `key` holding `quantity` items.
    ///
    /// Unknown keys yield the empty sentinel; check [`ItemInstance::is_empty`].
    pub fn create_instance(&self, key: &str, quantity: u32) -> ItemInstance {
        match self.get(key) {
            Some(definition) => definition.create_instance(quantity),
            None => {
                log::debug!("No item registered for '{}', returning empty instance", key);
                ItemInstance::empty()
            }
        }
    }

    /// Create a single instance of `key`
    pub fn create_one(&self, key: &str) -> ItemInstance {
        self.create_instance(key, 1)
    }

    /// Snapshot of every registered key
    pub fn all_keys(&self) -> Vec<ItemKey> {
        self.definitions.keys().cloned().collect()
    }

    /// All definitions of a kind
    pub fn items_by_kind(&self, kind: ItemKind) -> Vec<&ItemDefinition> {
        self.definitions
            .values()
            .filter(|def| def.kind == kind)
            .collect()
    }

    /// All definitions in a category
    pub fn items_by_category(&self, category: ItemCategory) -> Vec<&ItemDefinition> {
        self.definitions
            .values()
            .filter(|def| def.category == category)
            .collect()
    }

    /// Iterate all definitions
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.values()
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
