//! Tiered modifier value ranges.
//!
//! Item levels fall into three bands. Each modifier type has one legal
//! value range per band, and rolls inside a band are skewed toward the
//! band's low end at its start and toward its maximum near its end.

use crate::error::EngineError;
use crate::modifier::ModifierType;
use crate::numeric::{round_stat, StatValue};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive level bands of the three tiers.
pub const TIER_BANDS: [(u32, u32); 3] = [(1, 20), (21, 45), (46, 100)];

/// The legal value range of a modifier type within one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRange {
    pub min: StatValue,
    pub max: StatValue,
}

impl TierRange {
    pub const fn new(min: StatValue, max: StatValue) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies inside the range.
    pub fn contains(&self, value: StatValue) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Tier index (0-based) and progress through that tier for a level.
///
/// Levels above the last band use the last tier at full progress; level 0
/// is treated as level 1.
///
/// # Examples
///
/// ```rust
/// use riftcore::tier::tier_for_level;
///
/// assert_eq!(tier_for_level(1), (0, 0.0));
/// assert_eq!(tier_for_level(20), (0, 1.0));
/// assert_eq!(tier_for_level(21), (1, 0.0));
/// assert_eq!(tier_for_level(250), (2, 1.0));
/// ```
pub fn tier_for_level(level: u32) -> (usize, f64) {
    let level = level.max(1);
    for (tier, &(start, end)) in TIER_BANDS.iter().enumerate() {
        if level <= end {
            let progress = f64::from(level - start) / f64::from(end - start);
            return (tier, progress);
        }
    }
    (TIER_BANDS.len() - 1, 1.0)
}

/// The skew exponent for a given progress through a tier.
///
/// `bias = (1 - progress)^0.8`, `exponent = 0.5 + 2.5 * bias`: 3.0 at the
/// start of a tier (rolls hug the minimum), 0.5 at its end (rolls hug the
/// maximum). Strictly decreasing in progress.
pub fn bias_exponent(progress: f64) -> f64 {
    let bias = (1.0 - progress.clamp(0.0, 1.0)).powf(0.8);
    0.5 + 2.5 * bias
}

/// Roll one value inside `range`, skewed by `level`'s progress through its
/// tier, rounded and clamped to the range.
pub fn roll_biased<R: Rng + ?Sized>(range: TierRange, level: u32, rng: &mut R) -> StatValue {
    let (_, progress) = tier_for_level(level);
    let u: f64 = rng.gen();
    let value = range.min + (range.max - range.min) * u.powf(bias_exponent(progress));
    round_stat(value).clamp(range.min, range.max)
}

/// Value ranges per modifier type and tier.
///
/// # Examples
///
/// ```rust
/// use riftcore::modifier::ModifierType;
/// use riftcore::tier::TierTable;
///
/// let table = TierTable::builtin();
/// let early = table.range_for_level(ModifierType::Strength, 5).unwrap();
/// let late = table.range_for_level(ModifierType::Strength, 80).unwrap();
/// assert!(late.max > early.max);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    ranges: HashMap<ModifierType, [TierRange; 3]>,
}

impl TierTable {
    /// The table shipped with the crate; covers every modifier type.
    pub fn builtin() -> Self {
        let ranges = ModifierType::ALL
            .into_iter()
            .map(|kind| (kind, builtin_ranges(kind)))
            .collect();
        Self { ranges }
    }

    /// Load a table from JSON: a map from modifier type to three ranges.
    ///
    /// Types absent from the map are skipped (with a warning) when rolled.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let table: TierTable = serde_json::from_str(json)?;
        for (kind, tiers) in &table.ranges {
            if tiers.iter().any(|r| r.min > r.max) {
                return Err(EngineError::Catalog(format!(
                    "tier range for {:?} has min above max",
                    kind
                )));
            }
        }
        Ok(table)
    }

    /// The range of `kind` in tier `tier` (0-based).
    pub fn range(&self, kind: ModifierType, tier: usize) -> Option<TierRange> {
        self.ranges.get(&kind).and_then(|tiers| tiers.get(tier)).copied()
    }

    /// The range of `kind` for an item of `level`.
    pub fn range_for_level(&self, kind: ModifierType, level: u32) -> Option<TierRange> {
        self.range(kind, tier_for_level(level).0)
    }

    pub fn contains(&self, kind: ModifierType) -> bool {
        self.ranges.contains_key(&kind)
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::builtin()
    }
}

const fn tiers(t1: (f64, f64), t2: (f64, f64), t3: (f64, f64)) -> [TierRange; 3] {
    [
        TierRange::new(t1.0, t1.1),
        TierRange::new(t2.0, t2.1),
        TierRange::new(t3.0, t3.1),
    ]
}

fn builtin_ranges(kind: ModifierType) -> [TierRange; 3] {
    use ModifierType::*;
    match kind {
        LocalAddedPhysical => tiers((1.0, 6.0), (5.0, 14.0), (12.0, 30.0)),
        LocalAddedFire | LocalAddedCold | LocalAddedLightning => {
            tiers((1.0, 8.0), (6.0, 18.0), (15.0, 40.0))
        }
        LocalIncreasedPhysical => tiers((10.0, 25.0), (20.0, 50.0), (40.0, 90.0)),
        LocalAttackSpeed => tiers((3.0, 7.0), (6.0, 12.0), (10.0, 18.0)),
        LocalCritChance => tiers((5.0, 15.0), (12.0, 25.0), (20.0, 40.0)),
        LocalIncreasedArmor | LocalIncreasedEvasion | LocalIncreasedBarrier => {
            tiers((10.0, 25.0), (20.0, 50.0), (40.0, 90.0))
        }
        AddedPhysicalDamage => tiers((1.0, 4.0), (3.0, 9.0), (8.0, 20.0)),
        AddedFireDamage | AddedColdDamage | AddedLightningDamage | AddedVoidDamage => {
            tiers((1.0, 5.0), (4.0, 12.0), (10.0, 25.0))
        }
        IncreasedPhysicalDamage
        | IncreasedFireDamage
        | IncreasedColdDamage
        | IncreasedLightningDamage
        | IncreasedVoidDamage
        | IncreasedCritChance => tiers((5.0, 12.0), (10.0, 22.0), (18.0, 35.0)),
        IncreasedElementalDamage => tiers((4.0, 10.0), (8.0, 18.0), (15.0, 30.0)),
        IncreasedAttackSpeed => tiers((2.0, 5.0), (4.0, 8.0), (7.0, 12.0)),
        IncreasedCastSpeed => tiers((3.0, 6.0), (5.0, 10.0), (8.0, 15.0)),
        CritMultiplier => tiers((5.0, 10.0), (8.0, 18.0), (15.0, 30.0)),
        FlatArmor | FlatEvasion => tiers((5.0, 20.0), (15.0, 50.0), (40.0, 120.0)),
        FlatBarrier => tiers((5.0, 15.0), (12.0, 40.0), (30.0, 90.0)),
        IncreasedArmor | IncreasedEvasion | IncreasedBarrier => {
            tiers((3.0, 8.0), (6.0, 14.0), (12.0, 24.0))
        }
        MaxHealth => tiers((5.0, 20.0), (15.0, 45.0), (40.0, 90.0)),
        MaxMana => tiers((5.0, 15.0), (12.0, 35.0), (30.0, 70.0)),
        FireResistance | ColdResistance | LightningResistance | VoidResistance => {
            tiers((5.0, 12.0), (10.0, 24.0), (20.0, 40.0))
        }
        AllResistances => tiers((3.0, 6.0), (5.0, 10.0), (8.0, 16.0)),
        BlockChance | ManaShield | ReducedPhysicalTaken => {
            tiers((1.0, 3.0), (2.0, 5.0), (4.0, 8.0))
        }
        HealthRegen => tiers((1.0, 3.0), (2.0, 6.0), (5.0, 12.0)),
        ManaRegen => tiers((1.0, 2.0), (2.0, 4.0), (3.0, 8.0)),
        Strength | Dexterity | Intelligence => tiers((2.0, 8.0), (6.0, 16.0), (12.0, 30.0)),
        LifeLeech => tiers((1.0, 2.0), (1.0, 3.0), (2.0, 5.0)),
        MovementSpeed => tiers((2.0, 5.0), (4.0, 8.0), (6.0, 12.0)),
        Thorns => tiers((1.0, 5.0), (4.0, 12.0), (10.0, 30.0)),
        PhysicalTakenAsElemental => tiers((3.0, 8.0), (6.0, 14.0), (10.0, 25.0)),
        ReducedLeechRecovery => tiers((5.0, 10.0), (10.0, 20.0), (20.0, 40.0)),
    }
}
