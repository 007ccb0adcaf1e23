//! Item classification tags

use serde::{Deserialize, Serialize};

/// Item category
///
/// `None` is the unset sentinel; definitions carrying it are rejected by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Unset
    None,
    /// Raw gathered resources (wood, stone, fiber)
    Resource,
    /// Crafting materials
    Material,
    /// Tools (axes, pickaxes, etc.)
    Tool,
    /// Weapons (swords, bows, guns, etc.)
    Weapon,
    /// Armor pieces
    Armor,
    /// Consumables (potions, bandages, etc.)
    Consumable,
    /// Food and drink
    Food,
    /// Ammunition
    Ammo,
    /// Placeable building pieces
    Building,
    /// Quest items
    Quest,
    /// Currency
    Currency,
    /// Misc items
    Misc,
    /// Custom category
    Custom(u32),
}

impl Default for ItemCategory {
    fn default() -> Self {
        Self::None
    }
}

impl ItemCategory {
    /// Check if this is the unset sentinel
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Item kind (gameplay type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Unset
    None,
    /// Raw gathered resource
    Resource,
    /// Usable tool
    Tool,
    /// Weapon
    Weapon,
    /// Wearable armor
    Armor,
    /// Used up on use (food, medicine)
    Consumable,
    /// Ammunition for ranged weapons
    Ammunition,
    /// Can be placed in the world
    Placeable,
    /// Holds other items
    Container,
    /// Quest item
    Quest,
    /// Anything else
    Misc,
}

impl Default for ItemKind {
    fn default() -> Self {
        Self::Resource
    }
}

impl ItemKind {
    /// Check if this is the unset sentinel
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemRarity {
    /// Common items
    Common,
    /// Uncommon items
    Uncommon,
    /// Rare items
    Rare,
    /// Epic items
    Epic,
    /// Legendary items
    Legendary,
    /// Unique items (one per world)
    Unique,
}

impl Default for ItemRarity {
    fn default() -> Self {
        Self::Common
    }
}

impl ItemRarity {
    /// Value multiplier for this rank.
    ///
    /// Returns `None` for ranks outside the Common..=Legendary table; those
    /// apply no multiplier.
    pub fn value_multiplier(&self) -> Option<f64> {
        match self {
            Self::Common => Some(1.0),
            Self::Uncommon => Some(1.5),
            Self::Rare => Some(2.5),
            Self::Epic => Some(4.0),
            Self::Legendary => Some(8.0),
            Self::Unique => None,
        }
    }
}

/// Weight class affecting carry speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeightClass {
    /// No carry weight
    Weightless,
    /// Light items
    Light,
    /// Medium items
    Medium,
    /// Heavy items
    Heavy,
    /// Bulky items (two-handed carry)
    Bulky,
}

impl Default for WeightClass {
    fn default() -> Self {
        Self::Light
    }
}

/// Tool sub-type for equippable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    /// Chops trees
    Axe,
    /// Mines stone and ore
    Pickaxe,
    /// Digs
    Shovel,
    /// Builds and repairs
    Hammer,
    /// Cuts and skins
    Knife,
    /// Harvests plants
    Sickle,
    /// Catches fish
    FishingRod,
    /// Light source
    Torch,
}

/// Weapon sub-type for equippable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    /// Swords, clubs, maces
    Melee,
    /// Spears and pikes
    Spear,
    /// Bows
    Bow,
    /// Crossbows
    Crossbow,
    /// Firearms
    Firearm,
    /// Thrown weapons (rocks, javelins)
    Thrown,
}

/// Armor sub-type (the body slot it covers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorType {
    /// Head slot
    Head,
    /// Chest slot
    Chest,
    /// Legs slot
    Legs,
    /// Feet slot
    Feet,
    /// Hands slot
    Hands,
    /// Back slot (cloaks, packs)
    Back,
    /// Off-hand shield
    Shield,
}

/// Runtime state of an item instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemState {
    /// Intact and usable
    Normal,
    /// Worn below full durability
    Damaged,
    /// Durability exhausted
    Broken,
    /// Perishable that has gone off
    Spoiled,
    /// Currently burning (fuel, torches)
    Burning,
    /// Soaked
    Wet,
    /// Frozen solid
    Frozen,
}

impl Default for ItemState {
    fn default() -> Self {
        Self::Normal
    }
}
