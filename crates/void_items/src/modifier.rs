//! Item modifiers (enchantments, effects)

use serde::{Deserialize, Serialize};

/// Named numeric adjustment attached to a definition or instance.
///
/// Modifiers have no identity; two modifiers with the same name and value are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemModifier {
    /// Modifier name (e.g. "sharpness", "frost_resist")
    pub name: String,
    /// Modifier magnitude
    pub value: f64,
}

impl ItemModifier {
    /// Create a new modifier
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Check whether this modifier has the given name
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}
