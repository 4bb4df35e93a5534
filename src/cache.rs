//! Caller-owned stats cache.
//!
//! The engine keeps no memoized state. A host that wants to reuse a
//! snapshot between ticks holds a `StatsCache` next to its character and
//! calls `invalidate` on every equipment, level or instance change; the
//! next read recomputes the snapshot wholesale.

use crate::aggregate::{Aggregator, EffectiveStats};
use crate::character::Character;
use crate::context::StatContext;
use tracing::trace;

/// A stats snapshot plus an explicit dirty flag.
///
/// # Examples
///
/// ```rust
/// use riftcore::aggregate::Aggregator;
/// use riftcore::cache::StatsCache;
/// use riftcore::character::{Character, CharacterClass};
/// use riftcore::item::ItemCatalog;
/// use riftcore::StatContext;
///
/// let catalog = ItemCatalog::builtin().unwrap();
/// let aggregator = Aggregator::new(&catalog);
/// let mut hero = Character::new("c1", "Aldren", CharacterClass::Warrior);
/// let mut cache = StatsCache::new();
///
/// assert!(cache.current().is_none());
/// let before = cache.get_or_compute(&aggregator, &hero, &StatContext::new()).max_health;
///
/// hero.level_up();
/// cache.invalidate();
/// let after = cache.get_or_compute(&aggregator, &hero, &StatContext::new()).max_health;
/// assert_eq!(after, before + 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatsCache {
    stats: Option<EffectiveStats>,
    dirty: bool,
}

impl StatsCache {
    /// An empty, dirty cache.
    pub fn new() -> Self {
        Self {
            stats: None,
            dirty: true,
        }
    }

    /// Mark the snapshot stale.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.stats.is_none()
    }

    /// The snapshot, only if it is up to date.
    pub fn current(&self) -> Option<&EffectiveStats> {
        if self.is_dirty() {
            None
        } else {
            self.stats.as_ref()
        }
    }

    /// Return the snapshot, recomputing it first if dirty.
    pub fn get_or_compute(
        &mut self,
        aggregator: &Aggregator<'_>,
        character: &Character,
        context: &StatContext,
    ) -> &EffectiveStats {
        if self.dirty {
            self.stats = None;
            self.dirty = false;
        }
        self.stats.get_or_insert_with(|| {
            trace!(character = %character.id, "recomputing stats snapshot");
            aggregator.aggregate(character, context)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::item::ItemCatalog;

    #[test]
    fn test_cache_starts_dirty() {
        let cache = StatsCache::new();
        assert!(cache.is_dirty());
        assert!(cache.current().is_none());
        assert!(StatsCache::default().is_dirty());
    }

    #[test]
    fn test_invalidate_then_recompute() {
        let catalog = ItemCatalog::builtin().unwrap();
        let aggregator = Aggregator::new(&catalog);
        let mut c = Character::new("c", "C", CharacterClass::Ranger);
        let mut cache = StatsCache::new();

        let first = cache.get_or_compute(&aggregator, &c, &StatContext::new()).dexterity;
        assert!(!cache.is_dirty());
        assert!(cache.current().is_some());

        c.dexterity += 10;
        // Stale until invalidated.
        assert_eq!(cache.current().map(|s| s.dexterity), Some(first));
        cache.invalidate();
        assert!(cache.current().is_none());
        let second = cache.get_or_compute(&aggregator, &c, &StatContext::new()).dexterity;
        assert_eq!(second, first + 10.0);
    }

    #[test]
    fn test_clean_cache_returns_stored_snapshot() {
        let catalog = ItemCatalog::builtin().unwrap();
        let aggregator = Aggregator::new(&catalog);
        let mut c = Character::new("c", "C", CharacterClass::Warrior);
        let mut cache = StatsCache::new();

        let first = cache.get_or_compute(&aggregator, &c, &StatContext::new()).strength;
        c.strength += 4;
        let again = cache.get_or_compute(&aggregator, &c, &StatContext::new()).strength;
        assert_eq!(again, first);
        assert!(!cache.is_dirty());
    }
}
