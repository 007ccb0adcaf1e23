//! Void Items - Item Definition Registry
//!
//! This crate catalogs item definitions and stamps out item instances.
//!
//! # Features
//!
//! - Item definitions validated on registration
//! - Registry keyed by symbolic item key (first registration wins)
//! - Instances with their own identity, durability, ammo and modifiers
//! - Value model: condition, rarity and property multipliers
//! - Capability tag checks against caller-owned tag containers
//! - Deferred loading of JSON definition rows and data tables
//! - Registry events via listeners or channels
//!
//! # Example
//!
//! ```ignore
//! use void_items::prelude::*;
//!
//! let mut registry = ItemRegistry::new();
//! registry.register(
//!     ItemDefinition::new("iron_axe", "Iron Axe")
//!         .with_category(ItemCategory::Tool)
//!         .with_kind(ItemKind::Tool)
//!         .with_tool(ToolType::Axe)
//!         .with_value(40),
//! )?;
//!
//! let axe = registry.create_instance("iron_axe", 1);
//! assert!(!axe.is_empty());
//!
//! let missing = registry.create_instance("golden_axe", 1);
//! assert!(missing.is_empty());
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod event;
pub mod instance;
pub mod item;
pub mod loader;
pub mod modifier;
pub mod registry;
pub mod tags;

pub mod prelude {
    pub use crate::config::RegistryConfig;
    pub use crate::definition::{ItemDefinition, ItemKey, SurvivalTraits};
    pub use crate::error::{ConfigError, LoadError, LoadResult, RegistryError, ValidationError};
    pub use crate::event::{RegistryEvent, RegistryEvents, SubscriberId};
    pub use crate::instance::{InstanceId, ItemInstance};
    pub use crate::item::{
        ArmorType, ItemCategory, ItemKind, ItemRarity, ItemState, ToolType, WeaponType,
        WeightClass,
    };
    pub use crate::loader::{
        DefinitionLoader, DefinitionRef, JsonDefinitionLoader, MemoryDefinitionLoader,
    };
    pub use crate::modifier::ItemModifier;
    pub use crate::registry::{ItemRegistry, LoadReport};
    pub use crate::tags::{Tag, TagQuery, TagSet};
}

pub use prelude::*;
