//! Engine configuration.
//!
//! Every balance constant the engine uses lives here. All sections
//! deserialize with `#[serde(default)]`, so a JSON file only needs the
//! values it wants to change.

use crate::error::EngineError;
use crate::numeric::StatValue;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// # Examples
///
/// ```rust
/// use riftcore::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "combat": { "hub_area_id": "town" } }"#).unwrap();
/// assert_eq!(config.combat.hub_area_id, "town");
/// assert_eq!(config.aggregation.resistance_cap, 75.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aggregation: AggregationConfig,
    pub combat: CombatConfig,
    pub loot: LootConfig,
}

impl EngineConfig {
    /// Parse a configuration, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the formulas.
    pub fn validate(&self) -> Result<(), EngineError> {
        let agg = &self.aggregation;
        for (name, step) in [
            ("strength_step", agg.strength_step),
            ("dexterity_step", agg.dexterity_step),
            ("intelligence_step", agg.intelligence_step),
        ] {
            if step <= 0.0 {
                return Err(EngineError::Catalog(format!("{} must be positive", name)));
            }
        }
        if agg.unarmed_attack_speed <= 0.0 {
            return Err(EngineError::Catalog(
                "unarmed_attack_speed must be positive".into(),
            ));
        }
        for (name, cap) in [
            ("resistance_cap", agg.resistance_cap),
            ("block_cap", agg.block_cap),
            ("mana_shield_cap", agg.mana_shield_cap),
            ("reduced_physical_taken_cap", agg.reduced_physical_taken_cap),
            ("physical_taken_as_elemental_cap", agg.physical_taken_as_elemental_cap),
            ("reduced_leech_recovery_cap", agg.reduced_leech_recovery_cap),
        ] {
            if !(0.0..=100.0).contains(&cap) {
                return Err(EngineError::Catalog(format!("{} must lie in [0, 100]", name)));
            }
        }
        if !(0.0..=1.0).contains(&self.combat.low_health_fraction)
            || !(0.0..=1.0).contains(&self.combat.death_experience_penalty)
        {
            return Err(EngineError::Catalog(
                "combat fractions must lie in [0, 1]".into(),
            ));
        }
        let loot = &self.loot;
        for chance in [
            loot.legendary_chance_low,
            loot.legendary_chance_mid,
            loot.legendary_chance_high,
            loot.rare_share_low,
            loot.rare_share_high,
            loot.magic_share,
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(EngineError::Catalog(
                    "loot chances must lie in [0, 1]".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Constants of the stat aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Strength per step of the physical damage bonus.
    pub strength_step: StatValue,
    /// Increased physical damage (%) per strength step.
    pub strength_increased_physical: StatValue,
    pub dexterity_step: StatValue,
    /// Increased evasion (%) per dexterity step.
    pub dexterity_increased_evasion: StatValue,
    /// Flat crit chance points per dexterity step.
    pub dexterity_crit_chance: StatValue,
    pub intelligence_step: StatValue,
    /// Flat barrier per intelligence step.
    pub intelligence_barrier: StatValue,

    pub unarmed_attack_speed: StatValue,
    pub unarmed_crit_chance: StatValue,
    pub base_cast_speed: StatValue,
    pub base_crit_multiplier: StatValue,

    /// "More" multiplier (%) on attack speed and physical damage.
    pub dual_wield_more: StatValue,
    /// Share (%) of melee physical damage converted under the cold instance.
    pub cold_conversion_percent: StatValue,
    /// "More" multiplier (%) on cast speed while an instance is sustained.
    pub instance_cast_speed_more: StatValue,
    /// Flat crit chance points while an instance is sustained.
    pub instance_crit_chance: StatValue,
    /// Mana required to sustain an instance's bonus.
    pub instance_mana_upkeep: StatValue,

    pub resistance_cap: StatValue,
    pub block_cap: StatValue,
    pub mana_shield_cap: StatValue,
    pub reduced_physical_taken_cap: StatValue,
    pub physical_taken_as_elemental_cap: StatValue,
    pub reduced_leech_recovery_cap: StatValue,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            strength_step: 5.0,
            strength_increased_physical: 2.0,
            dexterity_step: 5.0,
            dexterity_increased_evasion: 2.0,
            dexterity_crit_chance: 1.0,
            intelligence_step: 5.0,
            intelligence_barrier: 5.0,
            unarmed_attack_speed: 1.0,
            unarmed_crit_chance: 5.0,
            base_cast_speed: 1.0,
            base_crit_multiplier: 150.0,
            dual_wield_more: 10.0,
            cold_conversion_percent: 30.0,
            instance_cast_speed_more: 10.0,
            instance_crit_chance: 5.0,
            instance_mana_upkeep: 10.0,
            resistance_cap: 75.0,
            block_cap: 75.0,
            mana_shield_cap: 10.0,
            reduced_physical_taken_cap: 75.0,
            physical_taken_as_elemental_cap: 100.0,
            reduced_leech_recovery_cap: 100.0,
        }
    }
}

/// Constants of incoming damage resolution and the host's regen tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// `k` in `armor / (armor + k * damage)`.
    pub armor_damage_factor: StatValue,
    /// Health at or below this fraction of max counts as low.
    pub low_health_fraction: StatValue,
    /// Fraction of experience lost on death (floored).
    pub death_experience_penalty: StatValue,
    pub hub_area_id: String,
    /// Seconds a drained barrier waits before recharging.
    pub barrier_recharge_delay: StatValue,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            armor_damage_factor: 10.0,
            low_health_fraction: 0.3,
            death_experience_penalty: 0.1,
            hub_area_id: String::from("hub"),
            barrier_recharge_delay: 4.0,
        }
    }
}

/// Rarity odds for dropped items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    /// Legendary chance below level 50.
    pub legendary_chance_low: f64,
    /// Legendary chance at levels 50-74.
    pub legendary_chance_mid: f64,
    /// Legendary chance at level 75 and above.
    pub legendary_chance_high: f64,
    /// Levels below this use `rare_share_low`.
    pub rare_level_threshold: u32,
    /// Rare share of the non-legendary mass below the threshold.
    pub rare_share_low: f64,
    pub rare_share_high: f64,
    /// Magic share of what remains after legendary and rare.
    pub magic_share: f64,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            legendary_chance_low: 0.01,
            legendary_chance_mid: 0.05,
            legendary_chance_high: 0.15,
            rare_level_threshold: 25,
            rare_share_low: 0.10,
            rare_share_high: 0.20,
            magic_share: 0.5,
        }
    }
}
