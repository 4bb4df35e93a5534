//! Combat resolution module.
//!
//! Resolves one incoming hit against a character and its stats snapshot.
//! Nothing is mutated: the result carries a `CharacterUpdate` the host
//! applies when it chooses to.
//!
//! Order for one hit: mana shield, type-specific mitigation, barrier then
//! health, post-state checks (low health, barrier broken, death).

use crate::aggregate::EffectiveStats;
use crate::character::Character;
use crate::config::CombatConfig;
use crate::context::ElementalInstance;
use crate::numeric::StatValue;
use crate::stat::DamageType;
use rand::Rng;
use tracing::{debug, error};

/// Partial character state produced by combat and regen.
///
/// Only `Some` fields change when applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterUpdate {
    pub current_health: Option<StatValue>,
    pub current_mana: Option<StatValue>,
    pub current_barrier: Option<StatValue>,
    pub experience: Option<u64>,
    pub area_id: Option<String>,
}

impl CharacterUpdate {
    /// Returns true if applying this update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.current_health.is_none()
            && self.current_mana.is_none()
            && self.current_barrier.is_none()
            && self.experience.is_none()
            && self.area_id.is_none()
    }

    /// Write every `Some` field into `character`.
    pub fn apply_to(&self, character: &mut Character) {
        if let Some(health) = self.current_health {
            character.current_health = health;
        }
        if let Some(mana) = self.current_mana {
            character.current_mana = mana;
        }
        if let Some(barrier) = self.current_barrier {
            character.current_barrier = barrier;
        }
        if let Some(experience) = self.experience {
            character.experience = experience;
        }
        if let Some(area) = &self.area_id {
            character.area_id = area.clone();
        }
    }
}

/// Outcome of one resolved hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageResult {
    pub updates: CharacterUpdate,
    /// Damage left after shield and mitigation, before barrier/health.
    pub final_damage: StatValue,
    pub is_dead: bool,
    /// Barrier went from above zero to zero on this hit.
    pub barrier_broken: bool,
    pub is_low_health: bool,
    pub death_message: Option<String>,
}

impl DamageResult {
    /// A result that changes nothing.
    pub fn inert() -> Self {
        Self::default()
    }
}

/// Fraction of a physical hit removed by armor.
///
/// `armor / (armor + factor * damage)`; zero when either input is not
/// positive.
///
/// # Examples
///
/// ```rust
/// use riftcore::combat::armor_mitigation;
///
/// assert_eq!(armor_mitigation(0.0, 50.0, 10.0), 0.0);
/// assert_eq!(armor_mitigation(100.0, 10.0, 10.0), 0.5);
/// assert!(armor_mitigation(100.0, 20.0, 10.0) < 0.5);
/// ```
pub fn armor_mitigation(armor: StatValue, damage: StatValue, factor: StatValue) -> StatValue {
    if armor <= 0.0 || damage <= 0.0 {
        return 0.0;
    }
    armor / (armor + factor * damage)
}

/// Multiplier left after a percent reduction.
///
/// Caps are applied once, during aggregation; here the value is only kept
/// inside 0..=100.
fn after_reduction(percent: StatValue) -> StatValue {
    1.0 - percent.clamp(0.0, 100.0) / 100.0
}

/// Resolves incoming hits with a fixed set of combat constants.
#[derive(Debug, Clone, Default)]
pub struct CombatResolver {
    config: CombatConfig,
}

impl CombatResolver {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Resolve one hit of `raw` damage against `character`.
    ///
    /// A missing snapshot is a caller bug: it is logged and an inert
    /// result comes back so the game loop keeps running.
    pub fn resolve_incoming_damage<R: Rng + ?Sized>(
        &self,
        raw: StatValue,
        damage_type: DamageType,
        character: &Character,
        stats: Option<&EffectiveStats>,
        rng: &mut R,
    ) -> DamageResult {
        let Some(stats) = stats else {
            error!(
                character = %character.id,
                "resolve_incoming_damage called without a stats snapshot"
            );
            return DamageResult::inert();
        };
        if !raw.is_finite() || raw <= 0.0 {
            return DamageResult::inert();
        }

        let mut updates = CharacterUpdate::default();

        // Mana shield
        let shield_fraction = stats.mana_shield.clamp(0.0, 100.0) / 100.0;
        let mut absorbed = raw * shield_fraction;
        if character.class.uses_mana() {
            absorbed = absorbed.min(character.current_mana.max(0.0));
            if absorbed > 0.0 {
                updates.current_mana = Some(character.current_mana - absorbed);
            }
        }
        let damage = raw - absorbed;

        let final_damage = match damage_type {
            DamageType::Physical => self.mitigate_physical(damage, stats, rng),
            _ => damage * after_reduction(stats.resistance(damage_type)),
        };

        // Barrier first, excess into health.
        let barrier = character.current_barrier.max(0.0);
        let to_barrier = final_damage.min(barrier);
        let new_barrier = barrier - to_barrier;
        let new_health = character.current_health - (final_damage - to_barrier);

        let barrier_broken = barrier > 0.0 && new_barrier <= 0.0;
        let is_dead = new_health <= 0.0;

        let mut result = DamageResult {
            final_damage,
            barrier_broken,
            is_dead,
            ..DamageResult::default()
        };

        if is_dead {
            let penalty =
                (character.experience as f64 * self.config.death_experience_penalty).floor() as u64;
            updates.experience = Some(character.experience - penalty.min(character.experience));
            updates.current_health = Some(character.base_max_health);
            updates.current_barrier = Some(0.0);
            updates.area_id = Some(self.config.hub_area_id.clone());
            result.death_message = Some(format!(
                "{} has fallen and returns to {}, losing {} experience.",
                character.name, self.config.hub_area_id, penalty
            ));
            debug!(character = %character.id, penalty, "character died");
        } else {
            updates.current_health = Some(new_health);
            if to_barrier > 0.0 {
                updates.current_barrier = Some(new_barrier);
            }
            result.is_low_health = new_health <= stats.max_health * self.config.low_health_fraction;
        }

        result.updates = updates;
        result
    }

    fn mitigate_physical<R: Rng + ?Sized>(
        &self,
        damage: StatValue,
        stats: &EffectiveStats,
        rng: &mut R,
    ) -> StatValue {
        let converted_fraction = stats.physical_taken_as_elemental.clamp(0.0, 100.0) / 100.0;
        let converted = damage * converted_fraction;
        let mut total = 0.0;
        if converted > 0.0 {
            let element = ElementalInstance::ALL[rng.gen_range(0..ElementalInstance::ALL.len())]
                .damage_type();
            total += converted * after_reduction(stats.resistance(element));
        }

        let physical = damage - converted;
        let mitigation = armor_mitigation(stats.armor, physical, self.config.armor_damage_factor);
        total += physical
            * (1.0 - mitigation)
            * after_reduction(stats.reduced_physical_taken);
        total
    }
}

/// Resolve one hit with the default combat constants.
///
/// See [`CombatResolver::resolve_incoming_damage`].
pub fn resolve_incoming_damage<R: Rng + ?Sized>(
    raw: StatValue,
    damage_type: DamageType,
    character: &Character,
    stats: Option<&EffectiveStats>,
    rng: &mut R,
) -> DamageResult {
    CombatResolver::new(CombatConfig::default())
        .resolve_incoming_damage(raw, damage_type, character, stats, rng)
}

/// Flat, unmitigated damage reflected to an attacker that is still alive.
pub fn thorns_reflection(stats: &EffectiveStats, attacker_alive: bool) -> StatValue {
    if attacker_alive {
        stats.thorns.max(0.0)
    } else {
        0.0
    }
}

/// Healing from life leech on `damage_dealt`, after reduced leech recovery
/// (capped at 100%).
pub fn leech_healing(damage_dealt: StatValue, stats: &EffectiveStats) -> StatValue {
    if damage_dealt <= 0.0 {
        return 0.0;
    }
    let reduction = stats.reduced_leech_recovery.clamp(0.0, 100.0) / 100.0;
    damage_dealt * stats.life_leech.max(0.0) / 100.0 * (1.0 - reduction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armor_mitigation_zero_inputs() {
        assert_eq!(armor_mitigation(0.0, 10.0, 10.0), 0.0);
        assert_eq!(armor_mitigation(10.0, 0.0, 10.0), 0.0);
        assert_eq!(armor_mitigation(-5.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_after_reduction_bounds() {
        assert_eq!(after_reduction(75.0), 0.25);
        assert_eq!(after_reduction(-30.0), 1.0);
        assert_eq!(after_reduction(150.0), 0.0);
    }

    #[test]
    fn test_character_update_apply() {
        let mut c = Character::new("c", "C", crate::character::CharacterClass::Mage);
        let update = CharacterUpdate {
            current_mana: Some(12.0),
            area_id: Some("crypt".into()),
            ..CharacterUpdate::default()
        };
        assert!(!update.is_empty());
        update.apply_to(&mut c);
        assert_eq!(c.current_mana, 12.0);
        assert_eq!(c.area_id, "crypt");
        assert_eq!(c.current_health, c.base_max_health);
        assert!(CharacterUpdate::default().is_empty());
    }
}
