//! Regeneration helpers for the host's tick.
//!
//! The host owns the clock. These helpers turn elapsed seconds into a
//! `CharacterUpdate` and track the delay a drained barrier waits before
//! it recharges.

use crate::aggregate::EffectiveStats;
use crate::character::Character;
use crate::combat::{CharacterUpdate, DamageResult};
use crate::config::CombatConfig;
use crate::numeric::StatValue;
use tracing::trace;

/// Health and mana regenerated over `elapsed` seconds, capped at the
/// snapshot's maximums. Mana only regenerates for mana users.
///
/// Returns an empty update when nothing changes.
pub fn regenerate(character: &Character, stats: &EffectiveStats, elapsed: f64) -> CharacterUpdate {
    let mut update = CharacterUpdate::default();
    if elapsed <= 0.0 {
        return update;
    }

    if character.current_health > 0.0 && character.current_health < stats.max_health {
        let health =
            (character.current_health + stats.health_regen * elapsed).min(stats.max_health);
        if health != character.current_health {
            update.current_health = Some(health);
        }
    }

    if character.class.uses_mana() && character.current_mana < stats.max_mana {
        let mana = (character.current_mana + stats.mana_regen * elapsed).min(stats.max_mana);
        if mana != character.current_mana {
            update.current_mana = Some(mana);
        }
    }

    update
}

/// Countdown before a drained barrier refills.
///
/// # Examples
///
/// ```rust
/// use riftcore::regen::BarrierRecharge;
///
/// let mut timer = BarrierRecharge::new(4.0);
/// timer.start();
/// assert!(!timer.tick(3.0));
/// assert!(timer.tick(1.5));
/// assert!(!timer.is_running());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierRecharge {
    delay: f64,
    remaining: Option<f64>,
}

impl BarrierRecharge {
    pub fn new(delay: f64) -> Self {
        Self {
            delay,
            remaining: None,
        }
    }

    /// A timer using the configured barrier recharge delay.
    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.barrier_recharge_delay)
    }

    /// Start (or restart) the countdown.
    pub fn start(&mut self) {
        self.remaining = Some(self.delay);
    }

    /// Start the countdown if `result` broke the barrier.
    pub fn observe(&mut self, result: &DamageResult) {
        if result.barrier_broken {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `elapsed` seconds. Returns true on the tick the delay
    /// runs out.
    pub fn tick(&mut self, elapsed: f64) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let left = remaining - elapsed;
        if left <= 0.0 {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }

    /// Advance and, when the delay runs out, refill the barrier to the
    /// snapshot's maximum.
    pub fn tick_update(&mut self, elapsed: f64, stats: &EffectiveStats) -> CharacterUpdate {
        if self.tick(elapsed) {
            trace!(barrier = stats.max_barrier, "barrier recharged");
            CharacterUpdate {
                current_barrier: Some(stats.max_barrier),
                ..CharacterUpdate::default()
            }
        } else {
            CharacterUpdate::default()
        }
    }

    pub fn delay(&self) -> StatValue {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = BarrierRecharge::new(2.0);
        assert!(!timer.tick(10.0));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_restart_resets_delay() {
        let mut timer = BarrierRecharge::new(2.0);
        timer.start();
        assert!(!timer.tick(1.5));
        timer.start();
        assert!(!timer.tick(1.5));
        assert!(timer.tick(0.5));
    }

    #[test]
    fn test_delay_from_config() {
        let config = CombatConfig {
            barrier_recharge_delay: 2.5,
            ..CombatConfig::default()
        };
        let mut timer = BarrierRecharge::from_config(&config);
        assert_eq!(timer.delay(), 2.5);
        timer.start();
        assert!(!timer.tick(2.0));
        assert!(timer.tick(0.5));
        assert_eq!(BarrierRecharge::from_config(&CombatConfig::default()).delay(), 4.0);
    }

    #[test]
    fn test_observe_only_on_break() {
        let mut timer = BarrierRecharge::new(1.0);
        timer.observe(&DamageResult::inert());
        assert!(!timer.is_running());
        let broken = DamageResult {
            barrier_broken: true,
            ..DamageResult::default()
        };
        timer.observe(&broken);
        assert!(timer.is_running());
    }
}
