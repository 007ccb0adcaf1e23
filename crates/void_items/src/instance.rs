//! Item instances
//!
//! An instance is a concrete item in the world or an inventory. It carries its
//! own copy of every runtime-relevant definition field and refers back to its
//! definition by key only.

use crate::definition::{ItemKey, SurvivalTraits};
use crate::item::{
    ArmorType, ItemCategory, ItemKind, ItemRarity, ItemState, ToolType, WeaponType, WeightClass,
};
use crate::modifier::ItemModifier;
use crate::tags::TagSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Globally unique instance identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generate a fresh random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concrete item created from a definition.
///
/// Equality and hashing use the instance ID only: two identical copies of the
/// same kind are still different items.
///
/// `clone` keeps the instance ID, so the clone is the same item (a snapshot or
/// a second handle). Use [`ItemInstance::fresh_copy`] to duplicate an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInstance {
    pub(crate) instance_id: InstanceId,
    /// Originating definition (`None` = empty sentinel)
    pub definition_key: Option<ItemKey>,
    pub display_name: String,
    pub quantity: u32,
    pub max_stack_size: u32,
    pub is_stackable: bool,
    pub category: ItemCategory,
    pub kind: ItemKind,
    pub rarity: ItemRarity,
    pub weight_class: WeightClass,
    pub is_equippable: bool,
    pub tool_type: Option<ToolType>,
    pub weapon_type: Option<WeaponType>,
    pub armor_type: Option<ArmorType>,
    pub is_consumable: bool,
    pub current_durability: u32,
    pub max_durability: u32,
    pub durability_decay_rate: f64,
    pub uses_ammo: bool,
    pub current_ammo: u32,
    pub max_ammo: u32,
    /// Base value copied from the definition
    pub value: u32,
    pub is_quest_item: bool,
    pub is_unique: bool,
    pub tags: TagSet,
    /// Template baseline
    pub default_modifiers: Vec<ItemModifier>,
    /// Live modifiers, diverge from the baseline over time
    pub current_modifiers: Vec<ItemModifier>,
    pub traits: SurvivalTraits,
    /// State restored by [`ItemInstance::initialize_from`]
    pub initial_state: ItemState,
    pub state: ItemState,
}

impl ItemInstance {
    /// The empty sentinel, returned for lookups that found nothing
    pub fn empty() -> Self {
        Self {
            instance_id: InstanceId::new(),
            definition_key: None,
            display_name: String::new(),
            quantity: 1,
            max_stack_size: 1,
            is_stackable: false,
            category: ItemCategory::None,
            kind: ItemKind::Resource,
            rarity: ItemRarity::Common,
            weight_class: WeightClass::Light,
            is_equippable: false,
            tool_type: None,
            weapon_type: None,
            armor_type: None,
            is_consumable: false,
            current_durability: 100,
            max_durability: 100,
            durability_decay_rate: 0.0,
            uses_ammo: false,
            current_ammo: 0,
            max_ammo: 0,
            value: 0,
            is_quest_item: false,
            is_unique: false,
            tags: TagSet::new(),
            default_modifiers: Vec::new(),
            current_modifiers: Vec::new(),
            traits: SurvivalTraits::default(),
            initial_state: ItemState::Normal,
            state: ItemState::Normal,
        }
    }

    /// Get the instance ID
    pub fn id(&self) -> InstanceId {
        self.instance_id
    }

    /// Check if this is the empty sentinel
    pub fn is_empty(&self) -> bool {
        self.definition_key.is_none()
    }

    /// Current durability as a fraction of max (1.0 for items that never degrade)
    pub fn condition_percent(&self) -> f64 {
        if self.max_durability > 0 {
            f64::from(self.current_durability) / f64::from(self.max_durability)
        } else {
            1.0
        }
    }

    /// Become a fresh, undamaged, unmodified copy of `template` with a new ID
    pub fn initialize_from(&mut self, template: &ItemInstance) {
        *self = template.clone();

        self.instance_id = InstanceId::new();
        self.state = template.initial_state;
        self.current_modifiers = template.default_modifiers.clone();
        self.current_durability = self.max_durability;
        if self.uses_ammo {
            self.current_ammo = self.max_ammo;
        }
    }

    /// Fresh copy of this instance (see [`ItemInstance::initialize_from`])
    pub fn fresh_copy(&self) -> Self {
        let mut copy = Self::empty();
        copy.initialize_from(self);
        copy
    }

    /// Check if durability is exhausted
    pub fn is_broken(&self) -> bool {
        self.state == ItemState::Broken
    }

    /// Remove durability, returning the resulting state.
    ///
    /// Items with no max durability never wear.
    pub fn apply_wear(&mut self, amount: u32) -> ItemState {
        if self.max_durability == 0 || amount == 0 {
            return self.state;
        }

        self.current_durability = self.current_durability.saturating_sub(amount);
        if self.current_durability == 0 {
            self.state = ItemState::Broken;
        } else if self.state == ItemState::Normal {
            self.state = ItemState::Damaged;
        }
        self.state
    }

    /// Restore durability up to max
    pub fn repair(&mut self, amount: u32) {
        self.current_durability = self
            .current_durability
            .saturating_add(amount)
            .min(self.max_durability);

        match self.state {
            ItemState::Damaged | ItemState::Broken
                if self.current_durability == self.max_durability =>
            {
                self.state = ItemState::Normal;
            }
            ItemState::Broken if self.current_durability > 0 => {
                self.state = ItemState::Damaged;
            }
            _ => {}
        }
    }

    /// Restore full durability
    pub fn repair_fully(&mut self) {
        self.repair(self.max_durability);
    }

    /// Spend `rounds` of ammunition. Returns false (and spends nothing) if short.
    pub fn consume_ammo(&mut self, rounds: u32) -> bool {
        if !self.uses_ammo || self.current_ammo < rounds {
            return false;
        }
        self.current_ammo -= rounds;
        true
    }

    /// Load up to `rounds` of ammunition, returning what didn't fit
    pub fn reload(&mut self, rounds: u32) -> u32 {
        if !self.uses_ammo {
            return rounds;
        }
        let space = self.max_ammo.saturating_sub(self.current_ammo);
        let loaded = rounds.min(space);
        self.current_ammo += loaded;
        rounds - loaded
    }

    /// Attach a live modifier
    pub fn add_modifier(&mut self, modifier: ItemModifier) {
        self.current_modifiers.push(modifier);
    }

    /// Remove all live modifiers with `name`, returning how many were removed
    pub fn remove_modifiers(&mut self, name: &str) -> usize {
        let before = self.current_modifiers.len();
        self.current_modifiers.retain(|m| !m.is_named(name));
        before - self.current_modifiers.len()
    }

    /// Drop live modifiers back to the template baseline
    pub fn reset_modifiers(&mut self) {
        self.current_modifiers = self.default_modifiers.clone();
    }
}

impl Default for ItemInstance {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for ItemInstance {
    fn eq(&self, other: &Self) -> bool {
        self.instance_id == other.instance_id
    }
}

impl Eq for ItemInstance {}

impl Hash for ItemInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instance_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ItemDefinition;
    use crate::tags::TagQuery;

    fn torch() -> ItemDefinition {
        ItemDefinition::new("torch", "Torch")
            .with_category(ItemCategory::Tool)
            .with_kind(ItemKind::Tool)
            .with_tool(ToolType::Torch)
            .with_durability(60, 0.5)
            .with_modifier(ItemModifier::new("light_radius", 8.0))
            .with_tag("Item.Flammable")
    }

    fn pistol() -> ItemDefinition {
        ItemDefinition::new("pistol", "Pistol")
            .with_category(ItemCategory::Weapon)
            .with_kind(ItemKind::Weapon)
            .with_weapon(WeaponType::Firearm)
            .with_ammo(8)
    }

    #[test]
    fn test_empty_sentinel() {
        let item = ItemInstance::empty();
        assert!(item.is_empty());
        assert!(ItemInstance::default().is_empty());
        assert!(!torch().create_instance(1).is_empty());
    }

    #[test]
    fn test_identity_equality() {
        let def = torch();
        let a = def.create_instance(1);
        let b = def.create_instance(1);

        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);

        // clone is the same item, fresh_copy is a new one
        assert_eq!(a, a.clone());
        assert_eq!(a.clone().id(), a.id());
        assert_ne!(a.fresh_copy().id(), a.id());
    }

    #[test]
    fn test_condition_percent() {
        let mut item = torch().create_instance(1);
        assert_eq!(item.condition_percent(), 1.0);

        item.current_durability = 15;
        assert_eq!(item.condition_percent(), 0.25);

        item.max_durability = 0;
        assert_eq!(item.condition_percent(), 1.0);
    }

    #[test]
    fn test_initialize_from_resets_runtime_state() {
        let mut template = pistol().create_instance(1);
        template.current_durability = 10;
        template.current_ammo = 2;
        template.state = ItemState::Wet;
        template.add_modifier(ItemModifier::new("rusty", -1.0));

        let mut copy = ItemInstance::empty();
        copy.initialize_from(&template);

        assert_ne!(copy.id(), template.id());
        assert_eq!(copy.definition_key, template.definition_key);
        assert_eq!(copy.display_name, template.display_name);
        assert_eq!(copy.quantity, template.quantity);
        assert_eq!(copy.weapon_type, template.weapon_type);
        assert_eq!(copy.current_durability, copy.max_durability);
        assert_eq!(copy.current_ammo, 8);
        assert_eq!(copy.state, ItemState::Normal);
        assert_eq!(copy.current_modifiers, template.default_modifiers);
    }

    #[test]
    fn test_initialize_from_copies_template_fields() {
        let def = ItemDefinition::new("relic_shard", "Relic Shard")
            .with_category(ItemCategory::Quest)
            .with_kind(ItemKind::Quest)
            .with_rarity(ItemRarity::Epic)
            .stackable(12)
            .with_value(75)
            .quest_item()
            .with_modifier(ItemModifier::new("glow", 3.0));
        let mut template = def.create_instance(9);
        template.add_modifier(ItemModifier::new("cracked", -1.0));

        let mut copy = ItemInstance::empty();
        copy.initialize_from(&template);

        assert_eq!(copy.quantity, 9);
        assert_eq!(copy.max_stack_size, 12);
        assert!(copy.is_stackable);
        assert_eq!(copy.rarity, ItemRarity::Epic);
        assert_eq!(copy.value, 75);
        assert!(copy.is_quest_item);
        assert_eq!(copy.default_modifiers, vec![ItemModifier::new("glow", 3.0)]);
        assert_eq!(copy.current_modifiers, copy.default_modifiers);
    }

    #[test]
    fn test_fresh_copy_keeps_tags_and_traits() {
        let original = torch().create_instance(1);
        let copy = original.fresh_copy();

        assert_ne!(copy, original);
        assert!(copy.tags.has_tag("Item.Flammable"));
        assert_eq!(copy.traits, original.traits);
        assert_eq!(copy.current_modifiers.len(), 1);
    }

    #[test]
    fn test_modifiers_diverge_from_baseline() {
        let mut item = torch().create_instance(1);
        item.add_modifier(ItemModifier::new("blessed", 1.0));
        item.add_modifier(ItemModifier::new("blessed", 2.0));

        assert_eq!(item.current_modifiers.len(), 3);
        assert_eq!(item.default_modifiers.len(), 1);

        assert_eq!(item.remove_modifiers("blessed"), 2);
        item.remove_modifiers("light_radius");
        assert!(item.current_modifiers.is_empty());

        item.reset_modifiers();
        assert_eq!(item.current_modifiers, item.default_modifiers);
    }

    #[test]
    fn test_wear_and_repair() {
        let mut item = torch().create_instance(1);

        assert_eq!(item.apply_wear(20), ItemState::Damaged);
        assert_eq!(item.current_durability, 40);

        assert_eq!(item.apply_wear(100), ItemState::Broken);
        assert_eq!(item.current_durability, 0);
        assert!(item.is_broken());

        item.repair(10);
        assert_eq!(item.state, ItemState::Damaged);

        item.repair_fully();
        assert_eq!(item.current_durability, 60);
        assert_eq!(item.state, ItemState::Normal);
    }

    #[test]
    fn test_indestructible_items_do_not_wear() {
        let mut item = torch().with_durability(0, 0.0).create_instance(1);
        assert_eq!(item.apply_wear(50), ItemState::Normal);
        assert_eq!(item.condition_percent(), 1.0);
    }

    #[test]
    fn test_ammo() {
        let mut gun = pistol().create_instance(1);

        assert!(gun.consume_ammo(3));
        assert_eq!(gun.current_ammo, 5);
        assert!(!gun.consume_ammo(6));
        assert_eq!(gun.current_ammo, 5);

        assert_eq!(gun.reload(10), 7);
        assert_eq!(gun.current_ammo, 8);

        let mut stick = torch().create_instance(1);
        assert!(!stick.consume_ammo(1));
        assert_eq!(stick.reload(4), 4);
    }

    #[test]
    fn test_serde_preserves_id() {
        let item = torch().create_instance(1);
        let json = serde_json::to_string(&item).unwrap();
        let back: ItemInstance = serde_json::from_str(&json).unwrap();

        assert_eq!(back, item);
        assert_eq!(back.current_durability, item.current_durability);
    }
}
