//! Procedural item generation.
//!
//! `LootGenerator::roll_drop` turns a monster level into an `Item`:
//! base selection, rarity, affix counts, tiered value rolls, implicit,
//! naming. Boss-exclusive bases skip every random step after selection
//! and come out with their fixed modifiers.
//!
//! All randomness comes from the caller's `Rng`, so a seeded generator
//! reproduces a drop exactly.

use crate::config::LootConfig;
use crate::item::{Item, ItemCatalog, ItemTemplate, ItemType, Rarity};
use crate::modifier::{AffixKind, Modifier, ModifierType};
use crate::tier::{roll_biased, TierTable};
use rand::Rng;
use tracing::{debug, warn};

/// Probability of each rarity at a given level. Sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityOdds {
    pub legendary: f64,
    pub rare: f64,
    pub magic: f64,
    pub normal: f64,
}

impl RarityOdds {
    /// Map a uniform `[0, 1)` roll onto a rarity, legendary band first.
    pub fn pick(&self, roll: f64) -> Rarity {
        if roll < self.legendary {
            Rarity::Legendary
        } else if roll < self.legendary + self.rare {
            Rarity::Rare
        } else if roll < self.legendary + self.rare + self.magic {
            Rarity::Magic
        } else {
            Rarity::Normal
        }
    }
}

/// Rolls items from a catalog.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use riftcore::item::{ItemCatalog, Rarity};
/// use riftcore::loot::LootGenerator;
///
/// let catalog = ItemCatalog::builtin().unwrap();
/// let generator = LootGenerator::new(&catalog);
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let item = generator
///     .roll_drop(30, None, Some(Rarity::Rare), None, &mut rng)
///     .unwrap();
/// assert_eq!(item.level_requirement, 30);
/// assert!(item.name.starts_with("Rare "));
/// assert!((4..=6).contains(&item.modifiers.len()));
/// ```
#[derive(Debug, Clone)]
pub struct LootGenerator<'a> {
    catalog: &'a ItemCatalog,
    tiers: TierTable,
    config: LootConfig,
}

impl<'a> LootGenerator<'a> {
    /// A generator with the built-in tier table and default odds.
    pub fn new(catalog: &'a ItemCatalog) -> Self {
        Self {
            catalog,
            tiers: TierTable::builtin(),
            config: LootConfig::default(),
        }
    }

    pub fn with_tiers(mut self, tiers: TierTable) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn with_config(mut self, config: LootConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Roll one drop for a monster of `monster_level`.
    ///
    /// With `forced_boss_id` matching a boss-exclusive base, that base's
    /// fixed item comes back (level range and `forced_type` are not
    /// consulted). Otherwise a non-boss base containing the level (and of
    /// `forced_type`, if given) is picked uniformly. `None` when nothing
    /// is eligible.
    pub fn roll_drop<R: Rng + ?Sized>(
        &self,
        monster_level: u32,
        forced_type: Option<ItemType>,
        forced_rarity: Option<Rarity>,
        forced_boss_id: Option<&str>,
        rng: &mut R,
    ) -> Option<Item> {
        if let Some(boss_id) = forced_boss_id {
            let bosses: Vec<&ItemTemplate> = self
                .catalog
                .templates()
                .filter(|t| t.boss.as_ref().map_or(false, |b| b.boss_id == boss_id))
                .collect();
            if !bosses.is_empty() {
                let template = bosses[rng.gen_range(0..bosses.len())];
                return Some(self.boss_item(template, monster_level, rng));
            }
            debug!(boss_id, "no boss-exclusive base for boss; rolling a regular drop");
        }

        let eligible: Vec<&ItemTemplate> = self
            .catalog
            .templates()
            .filter(|t| !t.is_boss_exclusive())
            .filter(|t| t.contains_level(monster_level))
            .filter(|t| forced_type.map_or(true, |ty| t.item_type == ty))
            .collect();
        if eligible.is_empty() {
            debug!(monster_level, ?forced_type, "no eligible item base");
            return None;
        }
        let template = eligible[rng.gen_range(0..eligible.len())];

        let rarity = match forced_rarity {
            Some(rarity) => rarity,
            None => self.rarity_odds(monster_level).pick(rng.gen()),
        };
        let (prefixes, suffixes) = affix_counts(rarity, rng);

        let mut modifiers = self.roll_side(template, AffixKind::Prefix, prefixes, monster_level, rng);
        modifiers.extend(self.roll_side(template, AffixKind::Suffix, suffixes, monster_level, rng));
        let implicit = self.roll_implicit(template, monster_level, rng);

        let item = Item {
            id: new_item_id(rng),
            base_id: template.id.clone(),
            name: display_name(rarity, &template.name),
            item_type: template.item_type,
            rarity,
            level_requirement: monster_level,
            modifiers,
            implicit,
        };
        debug!(
            item = %item.name,
            level = monster_level,
            affixes = item.modifiers.len(),
            "rolled drop"
        );
        Some(item)
    }

    /// Level-gated rarity odds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use riftcore::item::ItemCatalog;
    /// use riftcore::loot::LootGenerator;
    ///
    /// let catalog = ItemCatalog::builtin().unwrap();
    /// let odds = LootGenerator::new(&catalog).rarity_odds(10);
    /// assert_eq!(odds.legendary, 0.01);
    /// assert!((odds.rare - 0.099).abs() < 1e-12);
    /// ```
    pub fn rarity_odds(&self, level: u32) -> RarityOdds {
        let cfg = &self.config;
        let legendary = if level >= 75 {
            cfg.legendary_chance_high
        } else if level >= 50 {
            cfg.legendary_chance_mid
        } else {
            cfg.legendary_chance_low
        };
        let rare_share = if level < cfg.rare_level_threshold {
            cfg.rare_share_low
        } else {
            cfg.rare_share_high
        };
        let rare = (1.0 - legendary) * rare_share;
        let magic = (1.0 - legendary - rare) * cfg.magic_share;
        RarityOdds {
            legendary,
            rare,
            magic,
            normal: 1.0 - legendary - rare - magic,
        }
    }

    /// Roll a single modifier of `kind` at `level`, or `None` (with a
    /// warning) if the tier table has no range for it.
    pub fn roll_modifier<R: Rng + ?Sized>(
        &self,
        kind: ModifierType,
        level: u32,
        rng: &mut R,
    ) -> Option<Modifier> {
        let Some(range) = self.tiers.range_for_level(kind, level) else {
            warn!(modifier = ?kind, level, "no tier range for modifier; skipping it");
            return None;
        };
        if kind.is_range() {
            let a = roll_biased(range, level, rng);
            let b = roll_biased(range, level, rng);
            Some(Modifier::range(kind, a, b))
        } else {
            Some(Modifier::scalar(kind, roll_biased(range, level, rng)))
        }
    }

    fn roll_side<R: Rng + ?Sized>(
        &self,
        template: &ItemTemplate,
        side: AffixKind,
        count: usize,
        level: u32,
        rng: &mut R,
    ) -> Vec<Modifier> {
        let mut pool = template.allowed_of(side);
        let mut rolled = Vec::with_capacity(count);
        while rolled.len() < count && !pool.is_empty() {
            let kind = pool.swap_remove(rng.gen_range(0..pool.len()));
            if let Some(modifier) = self.roll_modifier(kind, level, rng) {
                rolled.push(modifier);
            }
        }
        if rolled.len() < count {
            debug!(
                template = %template.id,
                ?side,
                wanted = count,
                rolled = rolled.len(),
                "affix pool exhausted"
            );
        }
        rolled
    }

    fn roll_implicit<R: Rng + ?Sized>(
        &self,
        template: &ItemTemplate,
        level: u32,
        rng: &mut R,
    ) -> Option<Modifier> {
        let total: f64 = template.implicit_pool.iter().map(|c| c.weight).sum();
        if template.implicit_pool.is_empty() || total <= 0.0 {
            return None;
        }
        let mut roll = rng.gen::<f64>() * total;
        let mut chosen = template.implicit_pool[template.implicit_pool.len() - 1].kind;
        for candidate in &template.implicit_pool {
            if roll < candidate.weight {
                chosen = candidate.kind;
                break;
            }
            roll -= candidate.weight;
        }
        self.roll_modifier(chosen, level, rng)
    }

    fn boss_item<R: Rng + ?Sized>(&self, template: &ItemTemplate, level: u32, rng: &mut R) -> Item {
        let (modifiers, implicit) = match &template.boss {
            Some(boss) => (boss.modifiers.clone(), boss.implicit),
            None => (Vec::new(), None),
        };
        debug!(item = %template.id, level, "rolled boss-exclusive drop");
        Item {
            id: new_item_id(rng),
            base_id: template.id.clone(),
            name: display_name(Rarity::Legendary, &template.name),
            item_type: template.item_type,
            rarity: Rarity::Legendary,
            level_requirement: level,
            modifiers,
            implicit,
        }
    }
}

/// Prefix and suffix counts for a rarity.
///
/// Rare sides each start at 1-3, then grow alternately (prefix first,
/// at most 3 per side) until the total is at least 4.
pub fn affix_counts<R: Rng + ?Sized>(rarity: Rarity, rng: &mut R) -> (usize, usize) {
    match rarity {
        Rarity::Normal => (0, 0),
        Rarity::Magic => {
            if rng.gen_bool(0.5) {
                (1, 1)
            } else if rng.gen_bool(0.5) {
                (1, 0)
            } else {
                (0, 1)
            }
        }
        Rarity::Rare => {
            let mut prefixes = 1 + rng.gen_range(0..=2);
            let mut suffixes = 1 + rng.gen_range(0..=2);
            let mut prefix_turn = true;
            while prefixes + suffixes < 4 {
                if (prefix_turn && prefixes < 3) || suffixes >= 3 {
                    prefixes += 1;
                } else {
                    suffixes += 1;
                }
                prefix_turn = !prefix_turn;
            }
            (prefixes, suffixes)
        }
        Rarity::Legendary => {
            if rng.gen_bool(0.5) {
                (2, 3)
            } else {
                (3, 3)
            }
        }
    }
}

fn display_name(rarity: Rarity, base_name: &str) -> String {
    match rarity {
        Rarity::Normal => base_name.to_string(),
        _ => format!("{} {}", rarity, base_name),
    }
}

fn new_item_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("item-{:016x}", rng.gen::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_odds_sum_to_one() {
        let catalog = ItemCatalog::default();
        let generator = LootGenerator::new(&catalog);
        for level in [1, 24, 25, 49, 50, 74, 75, 120] {
            let odds = generator.rarity_odds(level);
            let sum = odds.legendary + odds.rare + odds.magic + odds.normal;
            assert!((sum - 1.0).abs() < 1e-12);
        }
        assert_eq!(generator.rarity_odds(49).legendary, 0.01);
        assert_eq!(generator.rarity_odds(50).legendary, 0.05);
        assert_eq!(generator.rarity_odds(75).legendary, 0.15);
    }

    #[test]
    fn test_pick_bands() {
        let odds = RarityOdds {
            legendary: 0.1,
            rare: 0.2,
            magic: 0.3,
            normal: 0.4,
        };
        assert_eq!(odds.pick(0.05), Rarity::Legendary);
        assert_eq!(odds.pick(0.25), Rarity::Rare);
        assert_eq!(odds.pick(0.55), Rarity::Magic);
        assert_eq!(odds.pick(0.95), Rarity::Normal);
    }

    #[test]
    fn test_affix_counts_contract() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..2000 {
            assert_eq!(affix_counts(Rarity::Normal, &mut rng), (0, 0));

            let (p, s) = affix_counts(Rarity::Magic, &mut rng);
            assert!((1..=2).contains(&(p + s)));
            assert!(p <= 1 && s <= 1);

            let (p, s) = affix_counts(Rarity::Rare, &mut rng);
            assert!((4..=6).contains(&(p + s)));
            assert!((1..=3).contains(&p) && (1..=3).contains(&s));

            let (p, s) = affix_counts(Rarity::Legendary, &mut rng);
            assert!(matches!((p, s), (2, 3) | (3, 3)));
        }
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let catalog = ItemCatalog::default();
        let generator = LootGenerator::new(&catalog);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generator.roll_drop(10, None, None, None, &mut rng).is_none());
        assert!(generator
            .roll_drop(10, None, None, Some("nobody"), &mut rng)
            .is_none());
    }

    #[test]
    fn test_missing_tier_range_skips_modifier() {
        let catalog = ItemCatalog::builtin().unwrap();
        let tiers = TierTable::from_json("{}").unwrap();
        let generator = LootGenerator::new(&catalog).with_tiers(tiers);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let item = generator
            .roll_drop(30, None, Some(Rarity::Legendary), None, &mut rng)
            .unwrap();
        assert!(item.modifiers.is_empty());
        assert!(item.implicit.is_none());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Rarity::Normal, "Iron Axe"), "Iron Axe");
        assert_eq!(display_name(Rarity::Magic, "Iron Axe"), "Magic Iron Axe");
    }
}
