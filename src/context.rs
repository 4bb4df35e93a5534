//! Context information for stat aggregation.
//!
//! The `StatContext` carries the game-state inputs that influence
//! aggregation but are not part of the character itself. Everything the
//! engine reads comes in explicitly through this value, never from
//! ambient state, so aggregation stays a pure function of its inputs.

use crate::stat::DamageType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The active elemental "mode" of a character.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementalInstance {
    Fire,
    Cold,
    Lightning,
}

impl ElementalInstance {
    /// Every instance, in the order random element picks index them.
    pub const ALL: [ElementalInstance; 3] = [
        ElementalInstance::Fire,
        ElementalInstance::Cold,
        ElementalInstance::Lightning,
    ];

    /// The damage type this instance attributes damage to.
    pub fn damage_type(self) -> DamageType {
        match self {
            ElementalInstance::Fire => DamageType::Fire,
            ElementalInstance::Cold => DamageType::Cold,
            ElementalInstance::Lightning => DamageType::Lightning,
        }
    }
}

impl fmt::Display for ElementalInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.damage_type().fmt(f)
    }
}

/// Context information for stat aggregation.
///
/// # Examples
///
/// ```rust
/// use riftcore::{ElementalInstance, StatContext};
///
/// let context = StatContext::new().with_instance(ElementalInstance::Cold);
/// assert_eq!(context.instance(), Some(ElementalInstance::Cold));
/// assert!(context.dual_wield_bonus());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatContext {
    instance: Option<ElementalInstance>,
    dual_wield_bonus: bool,
}

impl StatContext {
    /// Create a context with no active instance and the dual-wield bonus on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active elemental instance.
    pub fn with_instance(mut self, instance: ElementalInstance) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Enable or disable the dual-wield "more" bonus.
    ///
    /// Balance tooling evaluates a pair of weapons both ways to measure
    /// what the bonus is worth.
    pub fn with_dual_wield_bonus(mut self, enabled: bool) -> Self {
        self.dual_wield_bonus = enabled;
        self
    }

    /// The active elemental instance, if any.
    pub fn instance(&self) -> Option<ElementalInstance> {
        self.instance
    }

    /// Whether the dual-wield bonus is applied.
    pub fn dual_wield_bonus(&self) -> bool {
        self.dual_wield_bonus
    }
}

impl Default for StatContext {
    fn default() -> Self {
        Self {
            instance: None,
            dual_wield_bonus: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = StatContext::new();
        assert_eq!(ctx.instance(), None);
        assert!(ctx.dual_wield_bonus());
    }

    #[test]
    fn test_context_builder() {
        let ctx = StatContext::new()
            .with_instance(ElementalInstance::Lightning)
            .with_dual_wield_bonus(false);
        assert_eq!(ctx.instance(), Some(ElementalInstance::Lightning));
        assert!(!ctx.dual_wield_bonus());
    }

    #[test]
    fn test_instance_damage_type() {
        assert_eq!(ElementalInstance::Fire.damage_type(), DamageType::Fire);
        assert_eq!(ElementalInstance::Cold.to_string(), "cold");
    }
}
