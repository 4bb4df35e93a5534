//! Stat sources module.
//!
//! Sources produce base values for stats. Multiple sources for the same
//! stat are summed together (additive). A source remembers where its
//! value came from (the character sheet, an item template, or a rolled
//! modifier) so the resolved breakdown can show it.

use crate::character::EquipmentSlot;
use crate::modifier::ModifierType;
use crate::numeric::StatValue;

/// Trait for stat sources that produce base values.
///
/// Sources are stateless and deterministic. Multiple sources for the same
/// stat are summed together (additive).
///
/// # Examples
///
/// ```rust
/// use riftcore::source::{ConstantSource, StatSource};
///
/// let source = ConstantSource::new("base strength", 10.0);
/// assert_eq!(source.value(), 10.0);
/// assert_eq!(source.description(), "base strength");
/// ```
pub trait StatSource: Send + Sync {
    /// The value this source contributes.
    fn value(&self) -> StatValue;

    /// Human-readable origin, used in `ResolvedStat` breakdowns.
    fn description(&self) -> String;
}

/// A constant source, typically a value from the character sheet.
#[derive(Debug, Clone)]
pub struct ConstantSource {
    label: &'static str,
    value: StatValue,
}

impl ConstantSource {
    /// Create a new constant source.
    pub fn new(label: &'static str, value: StatValue) -> Self {
        Self { label, value }
    }
}

impl StatSource for ConstantSource {
    fn value(&self) -> StatValue {
        self.value
    }

    fn description(&self) -> String {
        self.label.to_string()
    }
}

/// A template's base defence (armor, evasion, barrier, block) after the
/// item's own local modifiers have been applied.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    slot: EquipmentSlot,
    template_id: String,
    value: StatValue,
}

impl TemplateSource {
    /// Create a new template source.
    pub fn new(slot: EquipmentSlot, template_id: impl Into<String>, value: StatValue) -> Self {
        Self {
            slot,
            template_id: template_id.into(),
            value,
        }
    }
}

impl StatSource for TemplateSource {
    fn value(&self) -> StatValue {
        self.value
    }

    fn description(&self) -> String {
        format!("{} base ({:?})", self.template_id, self.slot)
    }
}

/// A single global modifier rolled on an equipped item.
#[derive(Debug, Clone)]
pub struct ModifierSource {
    slot: EquipmentSlot,
    modifier: ModifierType,
    implicit: bool,
    value: StatValue,
}

impl ModifierSource {
    /// Create a new modifier source.
    pub fn new(slot: EquipmentSlot, modifier: ModifierType, implicit: bool, value: StatValue) -> Self {
        Self {
            slot,
            modifier,
            implicit,
            value,
        }
    }
}

impl StatSource for ModifierSource {
    fn value(&self) -> StatValue {
        self.value
    }

    fn description(&self) -> String {
        let kind = if self.implicit { "implicit" } else { "affix" };
        format!("{:?} {} ({:?})", self.modifier, kind, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_source() {
        let source = ConstantSource::new("base armor", 12.0);
        assert_eq!(source.value(), 12.0);
    }

    #[test]
    fn test_modifier_source_description() {
        let source =
            ModifierSource::new(EquipmentSlot::Amulet, ModifierType::Strength, true, 8.0);
        assert_eq!(source.value(), 8.0);
        assert_eq!(source.description(), "Strength implicit (Amulet)");
    }

    #[test]
    fn test_template_source_description() {
        let source = TemplateSource::new(EquipmentSlot::BodyArmor, "leather_vest", 40.0);
        assert!(source.description().contains("leather_vest"));
        assert!(source.description().contains("BodyArmor"));
    }
}
