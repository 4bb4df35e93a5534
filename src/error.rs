//! Error types for the engine.
//!
//! Ordinary data-driven edge cases (a missing template, a stats snapshot
//! that was never computed, no eligible loot) are not errors: they are
//! logged and handled in place. `EngineError` covers the rest: rule-set
//! programming mistakes found by the resolver, and malformed static data
//! or invalid equipment requests reported back to the host.

use crate::character::EquipmentSlot;
use crate::stat::Stat;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[Stat]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|stat| stat.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors reported by the engine.
///
/// # Examples
///
/// ```rust
/// use riftcore::{EngineError, Stat};
///
/// let err = EngineError::MissingDependency(Stat::Strength);
/// assert_eq!(err.to_string(), "Missing dependency: strength");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A dependency cycle was detected between stat rules.
    ///
    /// Contains the path of stats involved in the cycle, closed by
    /// repeating the first stat.
    #[error("Cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<Stat> },

    /// A transform read a stat that was not resolved before it.
    #[error("Missing dependency: {0}")]
    MissingDependency(Stat),

    /// Static data (catalog, tier table, config) failed to load or validate.
    #[error("Invalid static data: {0}")]
    Catalog(String),

    /// An item was equipped into a slot its type cannot occupy.
    #[error("Item '{item}' cannot be equipped in slot {slot:?}")]
    SlotMismatch { item: String, slot: EquipmentSlot },

    /// An unequip was requested for a slot that holds nothing.
    #[error("Slot {0:?} is empty")]
    EmptySlot(EquipmentSlot),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Catalog(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::EmptySlot(EquipmentSlot::Helmet);
        assert!(err.to_string().contains("Helmet"));
    }

    #[test]
    fn test_cycle_error_display() {
        let err = EngineError::Cycle {
            path: vec![Stat::Strength, Stat::Dexterity, Stat::Strength],
        };
        assert_eq!(
            err.to_string(),
            "Cycle detected: strength -> dexterity -> strength"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<Stat, _> = serde_json::from_str("not json");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Catalog(_)));
    }
}
