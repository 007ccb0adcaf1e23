//! Item definitions
//!
//! A definition is the shared, immutable template for one kind of item. It owns
//! the validation rules checked on registration, the instancing algorithm, and
//! the economic value model.

use crate::error::ValidationError;
use crate::instance::{InstanceId, ItemInstance};
use crate::item::{
    ArmorType, ItemCategory, ItemKind, ItemRarity, ItemState, ToolType, WeaponType, WeightClass,
};
use crate::modifier::ItemModifier;
use crate::tags::{Tag, TagQuery, TagSet};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Lower bound applied to condition when scaling value
const MIN_CONDITION_FACTOR: f64 = 0.1;

const QUEST_VALUE_MULTIPLIER: f64 = 1.5;
const UNIQUE_VALUE_MULTIPLIER: f64 = 2.0;
const TOOL_OR_WEAPON_VALUE_MULTIPLIER: f64 = 1.25;
const ARMOR_VALUE_MULTIPLIER: f64 = 1.2;

/// Symbolic registry key (e.g. `"iron_axe"`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Create a new key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the key is unset
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Survival-specific properties carried from definition to instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalTraits {
    /// Nutrition restored when eaten
    pub nutrition_value: i32,
    /// Toxicity applied when eaten
    pub toxicity: i32,
    /// Seconds until the item spoils (0 = never)
    pub decay_time: f32,
    /// Can ignite fires
    pub is_fire_source: bool,
    /// Temperature change applied to the holder
    pub temperature_effect: f32,
    /// Cold protection
    pub warmth_rating: f32,
    /// Can burn as fuel
    pub is_flammable: bool,
    /// Seconds of burn time as fuel
    pub burn_time: f32,
    /// Whether the item is destroyed when durability runs out
    pub is_destroyable: bool,
    /// Slot count if the item is a container (0 = not a container)
    pub container_size: u32,
    /// Free-form ability description
    pub special_ability: String,
}

impl Default for SurvivalTraits {
    fn default() -> Self {
        Self {
            nutrition_value: 0,
            toxicity: 0,
            decay_time: 0.0,
            is_fire_source: false,
            temperature_effect: 0.0,
            warmth_rating: 0.0,
            is_flammable: false,
            burn_time: 0.0,
            is_destroyable: true,
            container_size: 0,
            special_ability: String::new(),
        }
    }
}

impl SurvivalTraits {
    /// Check if the item holds other items
    pub fn is_container(&self) -> bool {
        self.container_size > 0
    }
}

/// Item definition
///
/// Also the registry row format: every field deserializes with a default, so a
/// JSON row only needs the fields that differ from [`ItemDefinition::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefinition {
    /// Unique registry key
    pub key: ItemKey,
    /// Display name
    pub display_name: String,
    /// Description
    pub description: String,
    /// Category
    pub category: ItemCategory,
    /// Gameplay kind
    pub kind: ItemKind,
    /// Rarity
    pub rarity: ItemRarity,
    /// Weight class
    pub weight_class: WeightClass,
    /// Whether instances stack
    pub is_stackable: bool,
    /// Maximum stack size (only meaningful if stackable)
    pub max_stack_size: u32,
    /// Whether the item can be equipped
    pub is_equippable: bool,
    /// Tool sub-type (equippable items)
    pub tool_type: Option<ToolType>,
    /// Weapon sub-type (equippable items)
    pub weapon_type: Option<WeaponType>,
    /// Armor sub-type (equippable items)
    pub armor_type: Option<ArmorType>,
    /// Whether the item is consumed on use
    pub is_consumable: bool,
    /// Maximum durability (0 = never degrades)
    pub max_durability: u32,
    /// Durability lost per use
    pub durability_decay_rate: f64,
    /// Whether the item fires ammunition
    pub uses_ammo: bool,
    /// Magazine size
    pub max_ammo: u32,
    /// Base value in currency
    pub base_value: u32,
    /// Fraction of adjusted value paid when selling
    pub sell_value_multiplier: f64,
    /// Quest item
    pub is_quest_item: bool,
    /// Unique item
    pub is_unique: bool,
    /// Minimum user level. Not enforced by [`ItemDefinition::can_be_used_by`].
    pub required_level: u32,
    /// User must hold at least one of these tags
    pub required_tags: TagSet,
    /// Descriptive tags for filtering
    pub item_tags: TagSet,
    /// Template modifiers copied into each instance
    pub default_modifiers: Vec<ItemModifier>,
    /// Survival properties
    pub traits: SurvivalTraits,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(key: impl Into<ItemKey>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: String::new(),
            category: ItemCategory::None,
            kind: ItemKind::Resource,
            rarity: ItemRarity::Common,
            weight_class: WeightClass::Light,
            is_stackable: false,
            max_stack_size: 1,
            is_equippable: false,
            tool_type: None,
            weapon_type: None,
            armor_type: None,
            is_consumable: false,
            max_durability: 100,
            durability_decay_rate: 0.0,
            uses_ammo: false,
            max_ammo: 0,
            base_value: 0,
            sell_value_multiplier: 0.75,
            is_quest_item: false,
            is_unique: false,
            required_level: 1,
            required_tags: TagSet::new(),
            item_tags: TagSet::new(),
            default_modifiers: Vec::new(),
            traits: SurvivalTraits::default(),
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Set kind
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set rarity
    pub fn with_rarity(mut self, rarity: ItemRarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set weight class
    pub fn with_weight_class(mut self, weight_class: WeightClass) -> Self {
        self.weight_class = weight_class;
        self
    }

    /// Make stackable up to `max`
    pub fn stackable(mut self, max: u32) -> Self {
        self.is_stackable = true;
        self.max_stack_size = max;
        self
    }

    /// Make equippable as a tool
    pub fn with_tool(mut self, tool: ToolType) -> Self {
        self.is_equippable = true;
        self.tool_type = Some(tool);
        self
    }

    /// Make equippable as a weapon
    pub fn with_weapon(mut self, weapon: WeaponType) -> Self {
        self.is_equippable = true;
        self.weapon_type = Some(weapon);
        self
    }

    /// Make equippable as armor
    pub fn with_armor(mut self, armor: ArmorType) -> Self {
        self.is_equippable = true;
        self.armor_type = Some(armor);
        self
    }

    /// Mark consumable
    pub fn consumable(mut self) -> Self {
        self.is_consumable = true;
        self
    }

    /// Set durability and decay per use
    pub fn with_durability(mut self, max: u32, decay_rate: f64) -> Self {
        self.max_durability = max;
        self.durability_decay_rate = decay_rate;
        self
    }

    /// Make the item use ammunition
    pub fn with_ammo(mut self, max: u32) -> Self {
        self.uses_ammo = true;
        self.max_ammo = max;
        self
    }

    /// Set base value
    pub fn with_value(mut self, value: u32) -> Self {
        self.base_value = value;
        self
    }

    /// Set sell multiplier
    pub fn with_sell_multiplier(mut self, multiplier: f64) -> Self {
        self.sell_value_multiplier = multiplier;
        self
    }

    /// Mark as quest item
    pub fn quest_item(mut self) -> Self {
        self.is_quest_item = true;
        self
    }

    /// Mark as unique
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Set required level
    pub fn with_required_level(mut self, level: u32) -> Self {
        self.required_level = level;
        self
    }

    /// Add a required capability tag
    pub fn with_required_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.required_tags.insert(tag);
        self
    }

    /// Add a descriptive tag
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.item_tags.insert(tag);
        self
    }

    /// Add a default modifier
    pub fn with_modifier(mut self, modifier: ItemModifier) -> Self {
        self.default_modifiers.push(modifier);
        self
    }

    /// Set survival traits
    pub fn with_traits(mut self, traits: SurvivalTraits) -> Self {
        self.traits = traits;
        self
    }

    /// Check the registration rules
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.is_empty() {
            return Err(ValidationError::MissingKey);
        }
        if self.kind.is_none() {
            return Err(ValidationError::NoKind);
        }
        if self.category.is_none() {
            return Err(ValidationError::NoCategory);
        }
        if self.is_stackable && self.max_stack_size == 0 {
            return Err(ValidationError::InvalidStackSize {
                max_stack_size: self.max_stack_size,
            });
        }
        if self.is_equippable && !self.has_equipment_type() {
            return Err(ValidationError::NoEquipmentType);
        }
        check_non_negative("durability_decay_rate", self.durability_decay_rate)?;
        check_non_negative("sell_value_multiplier", self.sell_value_multiplier)?;
        Ok(())
    }

    /// Check whether any equip sub-type is set
    pub fn has_equipment_type(&self) -> bool {
        self.tool_type.is_some() || self.weapon_type.is_some() || self.armor_type.is_some()
    }

    /// Largest quantity a single instance may hold
    pub fn stack_limit(&self) -> u32 {
        if self.is_stackable {
            self.max_stack_size.max(1)
        } else {
            1
        }
    }

    /// Stamp out a new instance holding `quantity` items.
    ///
    /// Quantity is clamped into `1..=stack_limit()`. Reads nothing but `self`.
    pub fn create_instance(&self, quantity: u32) -> ItemInstance {
        let (tool_type, weapon_type, armor_type) = if self.is_equippable {
            (self.tool_type, self.weapon_type, self.armor_type)
        } else {
            (None, None, None)
        };

        ItemInstance {
            instance_id: InstanceId::new(),
            definition_key: Some(self.key.clone()),
            display_name: self.display_name.clone(),
            quantity: quantity.clamp(1, self.stack_limit()),
            max_stack_size: self.max_stack_size,
            is_stackable: self.is_stackable,
            category: self.category,
            kind: self.kind,
            rarity: self.rarity,
            weight_class: self.weight_class,
            is_equippable: self.is_equippable,
            tool_type,
            weapon_type,
            armor_type,
            is_consumable: self.is_consumable,
            current_durability: self.max_durability,
            max_durability: self.max_durability,
            durability_decay_rate: self.durability_decay_rate,
            uses_ammo: self.uses_ammo,
            current_ammo: if self.uses_ammo { self.max_ammo } else { 0 },
            max_ammo: self.max_ammo,
            value: self.base_value,
            is_quest_item: self.is_quest_item,
            is_unique: self.is_unique,
            tags: self.item_tags.clone(),
            default_modifiers: self.default_modifiers.clone(),
            current_modifiers: self.default_modifiers.clone(),
            traits: self.traits.clone(),
            initial_state: ItemState::Normal,
            state: ItemState::Normal,
        }
    }

    /// Value after condition, rarity and property multipliers.
    ///
    /// `condition` is clamped to `[0, 1]` and never scales below 10%.
    pub fn adjusted_value(&self, condition: f64) -> u32 {
        let condition = condition.clamp(0.0, 1.0).max(MIN_CONDITION_FACTOR);
        let mut value = f64::from(self.base_value) * condition;

        if let Some(multiplier) = self.rarity.value_multiplier() {
            value *= multiplier;
        }

        value *= self.value_modifiers();
        value.round() as u32
    }

    /// Price paid when a trader buys this item
    pub fn sell_value(&self, condition: f64) -> u32 {
        let value = f64::from(self.adjusted_value(condition)) * self.sell_value_multiplier;
        value.round() as u32
    }

    /// Combined property multiplier (quest, unique, equipment).
    ///
    /// Entries in `default_modifiers` have no effect on value; games wanting
    /// enchantment pricing add their own rule on top of this.
    pub fn value_modifiers(&self) -> f64 {
        let mut multiplier = 1.0;

        if self.is_quest_item {
            multiplier *= QUEST_VALUE_MULTIPLIER;
        }
        if self.is_unique {
            multiplier *= UNIQUE_VALUE_MULTIPLIER;
        }
        if self.is_equippable {
            if self.tool_type.is_some() || self.weapon_type.is_some() {
                multiplier *= TOOL_OR_WEAPON_VALUE_MULTIPLIER;
            }
            if self.armor_type.is_some() {
                multiplier *= ARMOR_VALUE_MULTIPLIER;
            }
        }

        multiplier
    }

    /// Check whether a holder of `tags` may use this item.
    ///
    /// Passes when no tags are required, otherwise when at least one required
    /// tag is held. `required_level` is left to the caller.
    pub fn can_be_used_by<Q: TagQuery + ?Sized>(&self, tags: &Q) -> bool {
        self.required_tags.is_empty() || self.required_tags.any_in(tags)
    }
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self::new(ItemKey::default(), String::new())
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeValue { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axe() -> ItemDefinition {
        ItemDefinition::new("iron_axe", "Iron Axe")
            .with_category(ItemCategory::Tool)
            .with_kind(ItemKind::Tool)
            .with_tool(ToolType::Axe)
            .with_durability(250, 1.0)
            .with_value(40)
    }

    fn valued(rarity: ItemRarity) -> ItemDefinition {
        ItemDefinition::new("gem", "Gem")
            .with_category(ItemCategory::Material)
            .with_rarity(rarity)
            .with_value(100)
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(axe().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_sentinels() {
        let def = ItemDefinition::new("thing", "Thing");
        assert_eq!(def.validate(), Err(ValidationError::NoCategory));

        let def = axe().with_kind(ItemKind::None);
        assert_eq!(def.validate(), Err(ValidationError::NoKind));

        let def = ItemDefinition::default().with_category(ItemCategory::Misc);
        assert_eq!(def.validate(), Err(ValidationError::MissingKey));
    }

    #[test]
    fn test_validate_stack_and_equipment() {
        let def = valued(ItemRarity::Common).stackable(0);
        assert_eq!(
            def.validate(),
            Err(ValidationError::InvalidStackSize { max_stack_size: 0 })
        );

        let mut def = valued(ItemRarity::Common);
        def.is_equippable = true;
        assert_eq!(def.validate(), Err(ValidationError::NoEquipmentType));
    }

    #[test]
    fn test_validate_negative_numbers() {
        let def = valued(ItemRarity::Common).with_sell_multiplier(-0.5);
        assert!(matches!(
            def.validate(),
            Err(ValidationError::NegativeValue { field: "sell_value_multiplier", .. })
        ));

        let def = axe().with_durability(10, f64::NAN);
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_quantity_clamping() {
        let single = axe();
        for q in [0, 1, 2, 500] {
            assert_eq!(single.create_instance(q).quantity, 1);
        }

        let arrows = valued(ItemRarity::Common).stackable(20);
        assert_eq!(arrows.create_instance(0).quantity, 1);
        assert_eq!(arrows.create_instance(7).quantity, 7);
        assert_eq!(arrows.create_instance(20).quantity, 20);
        assert_eq!(arrows.create_instance(21).quantity, 20);
    }

    #[test]
    fn test_create_instance_copies_template() {
        let def = axe()
            .with_modifier(ItemModifier::new("sharpness", 2.0))
            .with_tag("Item.Metal");
        let item = def.create_instance(1);

        assert_eq!(item.definition_key, Some(ItemKey::from("iron_axe")));
        assert_eq!(item.current_durability, 250);
        assert_eq!(item.max_durability, 250);
        assert_eq!(item.tool_type, Some(ToolType::Axe));
        assert_eq!(item.value, 40);
        assert_eq!(item.default_modifiers, item.current_modifiers);
        assert!(item.tags.has_tag("Item.Metal"));
        assert_eq!(item.state, ItemState::Normal);
        assert_eq!(item.initial_state, ItemState::Normal);
        assert!(!item.is_empty());
    }

    #[test]
    fn test_create_instance_fills_ammo() {
        let rifle = ItemDefinition::new("rifle", "Rifle")
            .with_category(ItemCategory::Weapon)
            .with_kind(ItemKind::Weapon)
            .with_weapon(WeaponType::Firearm)
            .with_ammo(5);

        let item = rifle.create_instance(1);
        assert!(item.uses_ammo);
        assert_eq!(item.current_ammo, 5);
    }

    #[test]
    fn test_equipment_types_dropped_when_not_equippable() {
        let mut def = axe();
        def.is_equippable = false;

        let item = def.create_instance(1);
        assert_eq!(item.tool_type, None);
    }

    #[test]
    fn test_rarity_values() {
        assert_eq!(valued(ItemRarity::Common).adjusted_value(1.0), 100);
        assert_eq!(valued(ItemRarity::Uncommon).adjusted_value(1.0), 150);
        assert_eq!(valued(ItemRarity::Rare).adjusted_value(1.0), 250);
        assert_eq!(valued(ItemRarity::Epic).adjusted_value(1.0), 400);
        assert_eq!(valued(ItemRarity::Legendary).adjusted_value(1.0), 800);
        assert_eq!(valued(ItemRarity::Unique).adjusted_value(1.0), 100);
    }

    #[test]
    fn test_condition_scaling() {
        let def = valued(ItemRarity::Common);
        assert_eq!(def.adjusted_value(0.5), 50);
        assert_eq!(def.adjusted_value(0.0), 10);
        assert_eq!(def.adjusted_value(-3.0), 10);
        assert_eq!(def.adjusted_value(7.0), 100);
    }

    #[test]
    fn test_value_monotonic_in_condition() {
        let def = valued(ItemRarity::Epic)
            .with_armor(ArmorType::Chest)
            .quest_item();
        let mut last = 0;
        for step in 0..=100 {
            let value = def.adjusted_value(f64::from(step) / 100.0);
            assert!(value >= last, "value dropped at condition {}", step);
            last = value;
        }
    }

    #[test]
    fn test_value_modifier_stacking() {
        let def = valued(ItemRarity::Common).quest_item().unique();
        assert_eq!(def.value_modifiers(), 3.0);
        assert_eq!(def.adjusted_value(1.0), 300);

        let def = def.with_sell_multiplier(0.75);
        assert_eq!(def.sell_value(1.0), 225);
    }

    #[test]
    fn test_equipment_value_bonuses() {
        let def = valued(ItemRarity::Common).with_weapon(WeaponType::Spear);
        assert_eq!(def.value_modifiers(), 1.25);

        let def = def.with_armor(ArmorType::Shield);
        assert!((def.value_modifiers() - 1.5).abs() < 1e-9);
        assert_eq!(def.adjusted_value(1.0), 150);
    }

    #[test]
    fn test_modifiers_do_not_affect_value() {
        let def = valued(ItemRarity::Common)
            .with_modifier(ItemModifier::new("gilded", 10.0));
        assert_eq!(def.value_modifiers(), 1.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 5 * 0.5 = 2.5
        let def = ItemDefinition::new("pebble", "Pebble")
            .with_category(ItemCategory::Resource)
            .with_value(5);
        assert_eq!(def.adjusted_value(0.5), 3);

        // 5 * 0.7 = 3.5
        assert_eq!(def.adjusted_value(0.7), 4);

        // 10 * 0.35 = 3.5
        let def = def.with_value(10).with_sell_multiplier(0.35);
        assert_eq!(def.sell_value(1.0), 4);
    }

    #[test]
    fn test_can_be_used_by() {
        let open = axe().with_required_level(30);
        assert!(open.can_be_used_by(&TagSet::new()));

        let gated = axe()
            .with_required_tag("Skill.Woodcutting")
            .with_required_tag("Class.Ranger");

        let none: TagSet = ["Class.Mage"].into_iter().collect();
        assert!(!gated.can_be_used_by(&none));

        let one: TagSet = ["Class.Ranger", "Class.Mage"].into_iter().collect();
        assert!(gated.can_be_used_by(&one));
    }

    #[test]
    fn test_row_defaults() {
        let def: ItemDefinition =
            serde_json::from_str(r#"{ "key": "stick", "category": "Resource" }"#).unwrap();

        assert_eq!(def.key.as_str(), "stick");
        assert_eq!(def.max_stack_size, 1);
        assert_eq!(def.max_durability, 100);
        assert_eq!(def.sell_value_multiplier, 0.75);
        assert_eq!(def.required_level, 1);
        assert_eq!(def.kind, ItemKind::Resource);
        assert!(def.traits.is_destroyable);
        assert_eq!(def.validate(), Ok(()));
    }
}
