//! Modifier module.
//!
//! A `Modifier` is one rolled affix (or implicit) on an item: a closed
//! `ModifierType` tag plus its value. Everything the rest of the engine
//! needs to know about a type (prefix or suffix, local or global, scalar
//! or range, which stat bucket it feeds) is answered by exhaustive
//! matches in this module, so all branching on modifier tags happens
//! here and nowhere else.

use crate::numeric::StatValue;
use crate::stat::{DamageType, Stat};
use serde::{Deserialize, Serialize};

/// Prefix or suffix classification of an affix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// Whether a modifier applies only to the item carrying it or to the
/// whole character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierScope {
    Local,
    Global,
}

/// What a modifier type does once equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierEffect {
    /// Adds its value to a character-wide stat bucket.
    Global(Stat),
    /// Adds a (min, max) pair to two character-wide buckets.
    GlobalRange(Stat, Stat),
    /// Adds flat damage of one type to the weapon carrying it.
    LocalDamage(DamageType),
    /// Increases the carrying weapon's physical damage by a percentage.
    LocalIncreasedPhysical,
    /// Increases the carrying weapon's attack speed by a percentage.
    LocalAttackSpeed,
    /// Increases the carrying weapon's crit chance by a percentage.
    LocalCritChance,
    /// Increases the carrying armor piece's base armor, evasion or barrier.
    LocalIncreasedDefence(Stat),
}

/// Every modifier type an item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    // Weapon-local
    LocalAddedPhysical,
    LocalAddedFire,
    LocalAddedCold,
    LocalAddedLightning,
    LocalIncreasedPhysical,
    LocalAttackSpeed,
    LocalCritChance,

    // Armor-local
    LocalIncreasedArmor,
    LocalIncreasedEvasion,
    LocalIncreasedBarrier,

    // Global offence
    AddedPhysicalDamage,
    AddedFireDamage,
    AddedColdDamage,
    AddedLightningDamage,
    AddedVoidDamage,
    IncreasedPhysicalDamage,
    IncreasedElementalDamage,
    IncreasedFireDamage,
    IncreasedColdDamage,
    IncreasedLightningDamage,
    IncreasedVoidDamage,
    IncreasedAttackSpeed,
    IncreasedCastSpeed,
    IncreasedCritChance,
    CritMultiplier,

    // Global defence
    FlatArmor,
    IncreasedArmor,
    FlatEvasion,
    IncreasedEvasion,
    FlatBarrier,
    IncreasedBarrier,
    MaxHealth,
    MaxMana,
    FireResistance,
    ColdResistance,
    LightningResistance,
    VoidResistance,
    AllResistances,
    BlockChance,
    HealthRegen,
    ManaRegen,

    // Attributes
    Strength,
    Dexterity,
    Intelligence,

    // Utility
    LifeLeech,
    MovementSpeed,
    Thorns,
    ManaShield,
    ReducedPhysicalTaken,
    PhysicalTakenAsElemental,
    ReducedLeechRecovery,
}

impl ModifierType {
    /// Every modifier type, in declaration order.
    pub const ALL: [ModifierType; 51] = [
        ModifierType::LocalAddedPhysical,
        ModifierType::LocalAddedFire,
        ModifierType::LocalAddedCold,
        ModifierType::LocalAddedLightning,
        ModifierType::LocalIncreasedPhysical,
        ModifierType::LocalAttackSpeed,
        ModifierType::LocalCritChance,
        ModifierType::LocalIncreasedArmor,
        ModifierType::LocalIncreasedEvasion,
        ModifierType::LocalIncreasedBarrier,
        ModifierType::AddedPhysicalDamage,
        ModifierType::AddedFireDamage,
        ModifierType::AddedColdDamage,
        ModifierType::AddedLightningDamage,
        ModifierType::AddedVoidDamage,
        ModifierType::IncreasedPhysicalDamage,
        ModifierType::IncreasedElementalDamage,
        ModifierType::IncreasedFireDamage,
        ModifierType::IncreasedColdDamage,
        ModifierType::IncreasedLightningDamage,
        ModifierType::IncreasedVoidDamage,
        ModifierType::IncreasedAttackSpeed,
        ModifierType::IncreasedCastSpeed,
        ModifierType::IncreasedCritChance,
        ModifierType::CritMultiplier,
        ModifierType::FlatArmor,
        ModifierType::IncreasedArmor,
        ModifierType::FlatEvasion,
        ModifierType::IncreasedEvasion,
        ModifierType::FlatBarrier,
        ModifierType::IncreasedBarrier,
        ModifierType::MaxHealth,
        ModifierType::MaxMana,
        ModifierType::FireResistance,
        ModifierType::ColdResistance,
        ModifierType::LightningResistance,
        ModifierType::VoidResistance,
        ModifierType::AllResistances,
        ModifierType::BlockChance,
        ModifierType::HealthRegen,
        ModifierType::ManaRegen,
        ModifierType::Strength,
        ModifierType::Dexterity,
        ModifierType::Intelligence,
        ModifierType::LifeLeech,
        ModifierType::MovementSpeed,
        ModifierType::Thorns,
        ModifierType::ManaShield,
        ModifierType::ReducedPhysicalTaken,
        ModifierType::PhysicalTakenAsElemental,
        ModifierType::ReducedLeechRecovery,
    ];

    /// What this modifier does once its item is equipped.
    pub fn effect(self) -> ModifierEffect {
        use ModifierEffect::*;
        match self {
            ModifierType::LocalAddedPhysical => LocalDamage(DamageType::Physical),
            ModifierType::LocalAddedFire => LocalDamage(DamageType::Fire),
            ModifierType::LocalAddedCold => LocalDamage(DamageType::Cold),
            ModifierType::LocalAddedLightning => LocalDamage(DamageType::Lightning),
            ModifierType::LocalIncreasedPhysical => LocalIncreasedPhysical,
            ModifierType::LocalAttackSpeed => LocalAttackSpeed,
            ModifierType::LocalCritChance => LocalCritChance,
            ModifierType::LocalIncreasedArmor => LocalIncreasedDefence(Stat::Armor),
            ModifierType::LocalIncreasedEvasion => LocalIncreasedDefence(Stat::Evasion),
            ModifierType::LocalIncreasedBarrier => LocalIncreasedDefence(Stat::Barrier),
            ModifierType::AddedPhysicalDamage => {
                GlobalRange(Stat::AddedPhysicalMin, Stat::AddedPhysicalMax)
            }
            ModifierType::AddedFireDamage => GlobalRange(Stat::AddedFireMin, Stat::AddedFireMax),
            ModifierType::AddedColdDamage => GlobalRange(Stat::AddedColdMin, Stat::AddedColdMax),
            ModifierType::AddedLightningDamage => {
                GlobalRange(Stat::AddedLightningMin, Stat::AddedLightningMax)
            }
            ModifierType::AddedVoidDamage => GlobalRange(Stat::AddedVoidMin, Stat::AddedVoidMax),
            ModifierType::IncreasedPhysicalDamage => Global(Stat::IncreasedPhysical),
            ModifierType::IncreasedElementalDamage => Global(Stat::IncreasedElemental),
            ModifierType::IncreasedFireDamage => Global(Stat::IncreasedFire),
            ModifierType::IncreasedColdDamage => Global(Stat::IncreasedCold),
            ModifierType::IncreasedLightningDamage => Global(Stat::IncreasedLightning),
            ModifierType::IncreasedVoidDamage => Global(Stat::IncreasedVoid),
            ModifierType::IncreasedAttackSpeed => Global(Stat::IncreasedAttackSpeed),
            ModifierType::IncreasedCastSpeed => Global(Stat::IncreasedCastSpeed),
            ModifierType::IncreasedCritChance => Global(Stat::IncreasedCritChance),
            ModifierType::CritMultiplier => Global(Stat::CritMultiplier),
            ModifierType::FlatArmor => Global(Stat::Armor),
            ModifierType::IncreasedArmor => Global(Stat::IncreasedArmor),
            ModifierType::FlatEvasion => Global(Stat::Evasion),
            ModifierType::IncreasedEvasion => Global(Stat::IncreasedEvasion),
            ModifierType::FlatBarrier => Global(Stat::Barrier),
            ModifierType::IncreasedBarrier => Global(Stat::IncreasedBarrier),
            ModifierType::MaxHealth => Global(Stat::MaxHealth),
            ModifierType::MaxMana => Global(Stat::MaxMana),
            ModifierType::FireResistance => Global(Stat::FireResistance),
            ModifierType::ColdResistance => Global(Stat::ColdResistance),
            ModifierType::LightningResistance => Global(Stat::LightningResistance),
            ModifierType::VoidResistance => Global(Stat::VoidResistance),
            ModifierType::AllResistances => Global(Stat::AllResistances),
            ModifierType::BlockChance => Global(Stat::BlockChance),
            ModifierType::HealthRegen => Global(Stat::HealthRegen),
            ModifierType::ManaRegen => Global(Stat::ManaRegen),
            ModifierType::Strength => Global(Stat::Strength),
            ModifierType::Dexterity => Global(Stat::Dexterity),
            ModifierType::Intelligence => Global(Stat::Intelligence),
            ModifierType::LifeLeech => Global(Stat::LifeLeech),
            ModifierType::MovementSpeed => Global(Stat::MovementSpeed),
            ModifierType::Thorns => Global(Stat::Thorns),
            ModifierType::ManaShield => Global(Stat::ManaShield),
            ModifierType::ReducedPhysicalTaken => Global(Stat::ReducedPhysicalTaken),
            ModifierType::PhysicalTakenAsElemental => Global(Stat::PhysicalTakenAsElemental),
            ModifierType::ReducedLeechRecovery => Global(Stat::ReducedLeechRecovery),
        }
    }

    /// Prefix or suffix.
    pub fn affix(self) -> AffixKind {
        match self {
            ModifierType::LocalAddedPhysical
            | ModifierType::LocalAddedFire
            | ModifierType::LocalAddedCold
            | ModifierType::LocalAddedLightning
            | ModifierType::LocalIncreasedPhysical
            | ModifierType::LocalIncreasedArmor
            | ModifierType::LocalIncreasedEvasion
            | ModifierType::LocalIncreasedBarrier
            | ModifierType::AddedPhysicalDamage
            | ModifierType::AddedFireDamage
            | ModifierType::AddedColdDamage
            | ModifierType::AddedLightningDamage
            | ModifierType::AddedVoidDamage
            | ModifierType::IncreasedPhysicalDamage
            | ModifierType::IncreasedElementalDamage
            | ModifierType::IncreasedFireDamage
            | ModifierType::IncreasedColdDamage
            | ModifierType::IncreasedLightningDamage
            | ModifierType::IncreasedVoidDamage
            | ModifierType::FlatArmor
            | ModifierType::IncreasedArmor
            | ModifierType::FlatEvasion
            | ModifierType::IncreasedEvasion
            | ModifierType::FlatBarrier
            | ModifierType::IncreasedBarrier
            | ModifierType::MaxHealth
            | ModifierType::MaxMana
            | ModifierType::Thorns => AffixKind::Prefix,

            ModifierType::LocalAttackSpeed
            | ModifierType::LocalCritChance
            | ModifierType::IncreasedAttackSpeed
            | ModifierType::IncreasedCastSpeed
            | ModifierType::IncreasedCritChance
            | ModifierType::CritMultiplier
            | ModifierType::FireResistance
            | ModifierType::ColdResistance
            | ModifierType::LightningResistance
            | ModifierType::VoidResistance
            | ModifierType::AllResistances
            | ModifierType::BlockChance
            | ModifierType::HealthRegen
            | ModifierType::ManaRegen
            | ModifierType::Strength
            | ModifierType::Dexterity
            | ModifierType::Intelligence
            | ModifierType::LifeLeech
            | ModifierType::MovementSpeed
            | ModifierType::ManaShield
            | ModifierType::ReducedPhysicalTaken
            | ModifierType::PhysicalTakenAsElemental
            | ModifierType::ReducedLeechRecovery => AffixKind::Suffix,
        }
    }

    /// Local or global.
    pub fn scope(self) -> ModifierScope {
        match self.effect() {
            ModifierEffect::Global(_) | ModifierEffect::GlobalRange(..) => ModifierScope::Global,
            _ => ModifierScope::Local,
        }
    }

    /// Whether this type carries a (min, max) flat-damage pair.
    pub fn is_range(self) -> bool {
        matches!(
            self.effect(),
            ModifierEffect::GlobalRange(..) | ModifierEffect::LocalDamage(_)
        )
    }

    /// Short human-readable label, used for tooltips and logs.
    pub fn label(self) -> &'static str {
        match self {
            ModifierType::LocalAddedPhysical => "Adds # to # Physical Damage",
            ModifierType::LocalAddedFire => "Adds # to # Fire Damage",
            ModifierType::LocalAddedCold => "Adds # to # Cold Damage",
            ModifierType::LocalAddedLightning => "Adds # to # Lightning Damage",
            ModifierType::LocalIncreasedPhysical => "#% increased Physical Damage",
            ModifierType::LocalAttackSpeed => "#% increased Attack Speed",
            ModifierType::LocalCritChance => "#% increased Critical Strike Chance",
            ModifierType::LocalIncreasedArmor => "#% increased Armor",
            ModifierType::LocalIncreasedEvasion => "#% increased Evasion",
            ModifierType::LocalIncreasedBarrier => "#% increased Barrier",
            ModifierType::AddedPhysicalDamage => "Adds # to # Physical Damage to Attacks",
            ModifierType::AddedFireDamage => "Adds # to # Fire Damage to Attacks",
            ModifierType::AddedColdDamage => "Adds # to # Cold Damage to Attacks",
            ModifierType::AddedLightningDamage => "Adds # to # Lightning Damage to Attacks",
            ModifierType::AddedVoidDamage => "Adds # to # Void Damage to Attacks",
            ModifierType::IncreasedPhysicalDamage => "#% increased global Physical Damage",
            ModifierType::IncreasedElementalDamage => "#% increased Elemental Damage",
            ModifierType::IncreasedFireDamage => "#% increased Fire Damage",
            ModifierType::IncreasedColdDamage => "#% increased Cold Damage",
            ModifierType::IncreasedLightningDamage => "#% increased Lightning Damage",
            ModifierType::IncreasedVoidDamage => "#% increased Void Damage",
            ModifierType::IncreasedAttackSpeed => "#% increased global Attack Speed",
            ModifierType::IncreasedCastSpeed => "#% increased Cast Speed",
            ModifierType::IncreasedCritChance => "#% increased global Critical Strike Chance",
            ModifierType::CritMultiplier => "+#% to Critical Strike Multiplier",
            ModifierType::FlatArmor => "+# to Armor",
            ModifierType::IncreasedArmor => "#% increased global Armor",
            ModifierType::FlatEvasion => "+# to Evasion",
            ModifierType::IncreasedEvasion => "#% increased global Evasion",
            ModifierType::FlatBarrier => "+# to Barrier",
            ModifierType::IncreasedBarrier => "#% increased global Barrier",
            ModifierType::MaxHealth => "+# to maximum Health",
            ModifierType::MaxMana => "+# to maximum Mana",
            ModifierType::FireResistance => "+#% to Fire Resistance",
            ModifierType::ColdResistance => "+#% to Cold Resistance",
            ModifierType::LightningResistance => "+#% to Lightning Resistance",
            ModifierType::VoidResistance => "+#% to Void Resistance",
            ModifierType::AllResistances => "+#% to all Resistances",
            ModifierType::BlockChance => "+#% Chance to Block",
            ModifierType::HealthRegen => "Regenerate # Health per second",
            ModifierType::ManaRegen => "Regenerate # Mana per second",
            ModifierType::Strength => "+# to Strength",
            ModifierType::Dexterity => "+# to Dexterity",
            ModifierType::Intelligence => "+# to Intelligence",
            ModifierType::LifeLeech => "#% of Damage Leeched as Life",
            ModifierType::MovementSpeed => "#% increased Movement Speed",
            ModifierType::Thorns => "Reflects # Damage to Attackers",
            ModifierType::ManaShield => "#% of Damage taken from Mana before Health",
            ModifierType::ReducedPhysicalTaken => "#% reduced Physical Damage taken",
            ModifierType::PhysicalTakenAsElemental => {
                "#% of Physical Damage taken as a random Element"
            }
            ModifierType::ReducedLeechRecovery => "#% reduced Leech recovery",
        }
    }
}

/// The numeric payload of a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierValue {
    /// A single value, e.g. `+12` or `+15%`.
    Scalar(StatValue),
    /// A flat damage pair, always stored with `min <= max`.
    Range { min: StatValue, max: StatValue },
}

/// A rolled modifier on an item instance.
///
/// # Examples
///
/// ```rust
/// use riftcore::modifier::{Modifier, ModifierType};
/// use riftcore::Stat;
///
/// // Range values are stored sorted.
/// let added = Modifier::range(ModifierType::AddedFireDamage, 9.0, 4.0);
/// assert_eq!(added.bounds(), (4.0, 9.0));
/// assert_eq!(
///     added.contributions(),
///     vec![(Stat::AddedFireMin, 4.0), (Stat::AddedFireMax, 9.0)]
/// );
///
/// // Local modifiers contribute nothing globally.
/// let local = Modifier::scalar(ModifierType::LocalAttackSpeed, 10.0);
/// assert!(local.contributions().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// The modifier's type tag.
    pub kind: ModifierType,
    /// The rolled value.
    pub value: ModifierValue,
}

impl Modifier {
    /// Create a scalar modifier.
    pub fn scalar(kind: ModifierType, value: StatValue) -> Self {
        Self {
            kind,
            value: ModifierValue::Scalar(value),
        }
    }

    /// Create a range modifier, sorting the pair.
    pub fn range(kind: ModifierType, a: StatValue, b: StatValue) -> Self {
        Self {
            kind,
            value: ModifierValue::Range {
                min: a.min(b),
                max: a.max(b),
            },
        }
    }

    /// The value as a `(min, max)` pair; scalars return `(v, v)`.
    pub fn bounds(&self) -> (StatValue, StatValue) {
        match self.value {
            ModifierValue::Scalar(v) => (v, v),
            ModifierValue::Range { min, max } => (min, max),
        }
    }

    /// The scalar value; for ranges, the low end.
    pub fn amount(&self) -> StatValue {
        self.bounds().0
    }

    /// Global stat contributions of this modifier.
    ///
    /// Local modifiers return nothing: they were already consumed when
    /// their item was resolved.
    pub fn contributions(&self) -> Vec<(Stat, StatValue)> {
        let (min, max) = self.bounds();
        match self.kind.effect() {
            ModifierEffect::Global(stat) => vec![(stat, min)],
            ModifierEffect::GlobalRange(min_stat, max_stat) => {
                vec![(min_stat, min), (max_stat, max)]
            }
            _ => Vec::new(),
        }
    }

    /// Tooltip text with the value substituted in.
    pub fn describe(&self) -> String {
        let label = self.kind.label();
        match self.value {
            ModifierValue::Scalar(v) => label.replacen('#', &format!("{}", v), 1),
            ModifierValue::Range { min, max } => label
                .replacen('#', &format!("{}", min), 1)
                .replacen('#', &format!("{}", max), 1),
        }
    }
}
