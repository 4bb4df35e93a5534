//! Stat identifier module.
//!
//! Provides the `Stat` type, the closed set of buckets the aggregation
//! engine accumulates modifier contributions into, and `DamageType`,
//! which maps each damage type onto its buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named stat bucket.
///
/// Every source and transform registered on a
/// [`StatResolver`](crate::resolver::StatResolver) targets one of these.
/// Because the set is closed, adding a bucket is a compiler-checked change
/// everywhere a `match` over it exists.
///
/// # Examples
///
/// ```rust
/// use riftcore::Stat;
///
/// assert_eq!(Stat::Strength.as_str(), "strength");
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    // Attributes
    Strength,
    Dexterity,
    Intelligence,

    // Flat added damage
    AddedPhysicalMin,
    AddedPhysicalMax,
    AddedFireMin,
    AddedFireMax,
    AddedColdMin,
    AddedColdMax,
    AddedLightningMin,
    AddedLightningMax,
    AddedVoidMin,
    AddedVoidMax,

    // Percent increases
    IncreasedPhysical,
    IncreasedElemental,
    IncreasedFire,
    IncreasedCold,
    IncreasedLightning,
    IncreasedVoid,
    IncreasedAttackSpeed,
    IncreasedCastSpeed,
    IncreasedCritChance,

    /// Flat crit chance points added on top of the weapon's base crit.
    CritChance,
    /// Flat crit multiplier points added on top of the base multiplier.
    CritMultiplier,

    // Defence
    Armor,
    IncreasedArmor,
    Evasion,
    IncreasedEvasion,
    Barrier,
    IncreasedBarrier,
    FireResistance,
    ColdResistance,
    LightningResistance,
    VoidResistance,
    AllResistances,
    BlockChance,

    // Resources
    MaxHealth,
    MaxMana,
    HealthRegen,
    ManaRegen,

    // Utility
    LifeLeech,
    ReducedLeechRecovery,
    MovementSpeed,
    Thorns,
    ManaShield,
    ReducedPhysicalTaken,
    PhysicalTakenAsElemental,
}

impl Stat {
    /// Every stat bucket, in declaration order.
    pub const ALL: [Stat; 47] = [
        Stat::Strength,
        Stat::Dexterity,
        Stat::Intelligence,
        Stat::AddedPhysicalMin,
        Stat::AddedPhysicalMax,
        Stat::AddedFireMin,
        Stat::AddedFireMax,
        Stat::AddedColdMin,
        Stat::AddedColdMax,
        Stat::AddedLightningMin,
        Stat::AddedLightningMax,
        Stat::AddedVoidMin,
        Stat::AddedVoidMax,
        Stat::IncreasedPhysical,
        Stat::IncreasedElemental,
        Stat::IncreasedFire,
        Stat::IncreasedCold,
        Stat::IncreasedLightning,
        Stat::IncreasedVoid,
        Stat::IncreasedAttackSpeed,
        Stat::IncreasedCastSpeed,
        Stat::IncreasedCritChance,
        Stat::CritChance,
        Stat::CritMultiplier,
        Stat::Armor,
        Stat::IncreasedArmor,
        Stat::Evasion,
        Stat::IncreasedEvasion,
        Stat::Barrier,
        Stat::IncreasedBarrier,
        Stat::FireResistance,
        Stat::ColdResistance,
        Stat::LightningResistance,
        Stat::VoidResistance,
        Stat::AllResistances,
        Stat::BlockChance,
        Stat::MaxHealth,
        Stat::MaxMana,
        Stat::HealthRegen,
        Stat::ManaRegen,
        Stat::LifeLeech,
        Stat::ReducedLeechRecovery,
        Stat::MovementSpeed,
        Stat::Thorns,
        Stat::ManaShield,
        Stat::ReducedPhysicalTaken,
        Stat::PhysicalTakenAsElemental,
    ];

    /// Get the snake_case name of this stat.
    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Dexterity => "dexterity",
            Stat::Intelligence => "intelligence",
            Stat::AddedPhysicalMin => "added_physical_min",
            Stat::AddedPhysicalMax => "added_physical_max",
            Stat::AddedFireMin => "added_fire_min",
            Stat::AddedFireMax => "added_fire_max",
            Stat::AddedColdMin => "added_cold_min",
            Stat::AddedColdMax => "added_cold_max",
            Stat::AddedLightningMin => "added_lightning_min",
            Stat::AddedLightningMax => "added_lightning_max",
            Stat::AddedVoidMin => "added_void_min",
            Stat::AddedVoidMax => "added_void_max",
            Stat::IncreasedPhysical => "increased_physical",
            Stat::IncreasedElemental => "increased_elemental",
            Stat::IncreasedFire => "increased_fire",
            Stat::IncreasedCold => "increased_cold",
            Stat::IncreasedLightning => "increased_lightning",
            Stat::IncreasedVoid => "increased_void",
            Stat::IncreasedAttackSpeed => "increased_attack_speed",
            Stat::IncreasedCastSpeed => "increased_cast_speed",
            Stat::IncreasedCritChance => "increased_crit_chance",
            Stat::CritChance => "crit_chance",
            Stat::CritMultiplier => "crit_multiplier",
            Stat::Armor => "armor",
            Stat::IncreasedArmor => "increased_armor",
            Stat::Evasion => "evasion",
            Stat::IncreasedEvasion => "increased_evasion",
            Stat::Barrier => "barrier",
            Stat::IncreasedBarrier => "increased_barrier",
            Stat::FireResistance => "fire_resistance",
            Stat::ColdResistance => "cold_resistance",
            Stat::LightningResistance => "lightning_resistance",
            Stat::VoidResistance => "void_resistance",
            Stat::AllResistances => "all_resistances",
            Stat::BlockChance => "block_chance",
            Stat::MaxHealth => "max_health",
            Stat::MaxMana => "max_mana",
            Stat::HealthRegen => "health_regen",
            Stat::ManaRegen => "mana_regen",
            Stat::LifeLeech => "life_leech",
            Stat::ReducedLeechRecovery => "reduced_leech_recovery",
            Stat::MovementSpeed => "movement_speed",
            Stat::Thorns => "thorns",
            Stat::ManaShield => "mana_shield",
            Stat::ReducedPhysicalTaken => "reduced_physical_taken",
            Stat::PhysicalTakenAsElemental => "physical_taken_as_elemental",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a damage instance, dealt or taken.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Void,
}

impl DamageType {
    /// Every damage type, physical first.
    pub const ALL: [DamageType; 5] = [
        DamageType::Physical,
        DamageType::Fire,
        DamageType::Cold,
        DamageType::Lightning,
        DamageType::Void,
    ];

    /// The flat added (min, max) buckets for this damage type.
    pub fn added_stats(self) -> (Stat, Stat) {
        match self {
            DamageType::Physical => (Stat::AddedPhysicalMin, Stat::AddedPhysicalMax),
            DamageType::Fire => (Stat::AddedFireMin, Stat::AddedFireMax),
            DamageType::Cold => (Stat::AddedColdMin, Stat::AddedColdMax),
            DamageType::Lightning => (Stat::AddedLightningMin, Stat::AddedLightningMax),
            DamageType::Void => (Stat::AddedVoidMin, Stat::AddedVoidMax),
        }
    }

    /// The type-specific percent-increase bucket.
    pub fn increased_stat(self) -> Stat {
        match self {
            DamageType::Physical => Stat::IncreasedPhysical,
            DamageType::Fire => Stat::IncreasedFire,
            DamageType::Cold => Stat::IncreasedCold,
            DamageType::Lightning => Stat::IncreasedLightning,
            DamageType::Void => Stat::IncreasedVoid,
        }
    }

    /// The resistance that mitigates this damage type, if any.
    ///
    /// Physical damage is mitigated by armor instead.
    pub fn resistance_stat(self) -> Option<Stat> {
        match self {
            DamageType::Physical => None,
            DamageType::Fire => Some(Stat::FireResistance),
            DamageType::Cold => Some(Stat::ColdResistance),
            DamageType::Lightning => Some(Stat::LightningResistance),
            DamageType::Void => Some(Stat::VoidResistance),
        }
    }

    /// Whether the global elemental increase applies to this type.
    pub fn is_elemental(self) -> bool {
        !matches!(self, DamageType::Physical)
    }

    /// Position in [`DamageType::ALL`].
    pub fn index(self) -> usize {
        match self {
            DamageType::Physical => 0,
            DamageType::Fire => 1,
            DamageType::Cold => 2,
            DamageType::Lightning => 3,
            DamageType::Void => 4,
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DamageType::Physical => "physical",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Lightning => "lightning",
            DamageType::Void => "void",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_ordering() {
        assert!(Stat::Strength < Stat::Dexterity);
        assert!(Stat::Armor < Stat::IncreasedArmor);
    }

    #[test]
    fn test_stat_serde_name_matches_as_str() {
        let json = serde_json::to_string(&Stat::PhysicalTakenAsElemental).unwrap();
        assert_eq!(json, "\"physical_taken_as_elemental\"");
        let back: Stat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stat::PhysicalTakenAsElemental);
    }

    #[test]
    fn test_damage_type_buckets() {
        assert_eq!(
            DamageType::Cold.added_stats(),
            (Stat::AddedColdMin, Stat::AddedColdMax)
        );
        assert_eq!(DamageType::Physical.resistance_stat(), None);
        assert_eq!(
            DamageType::Void.resistance_stat(),
            Some(Stat::VoidResistance)
        );
        for (i, ty) in DamageType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), i);
        }
    }
}
