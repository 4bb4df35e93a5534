use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use riftcore::combat::armor_mitigation;
use riftcore::loot::affix_counts;
use riftcore::modifier::AffixKind;
use riftcore::tier::roll_biased;
use riftcore::*;

fn rarity() -> impl Strategy<Value = Rarity> {
    prop::sample::select(Rarity::ALL.to_vec())
}

fn modifier_type() -> impl Strategy<Value = ModifierType> {
    prop::sample::select(ModifierType::ALL.to_vec())
}

proptest! {
    /// A biased roll never leaves its range.
    #[test]
    fn prop_biased_roll_in_range(
        kind in modifier_type(),
        level in 0u32..200,
        seed in any::<u64>(),
    ) {
        let tiers = TierTable::builtin();
        let range = tiers.range_for_level(kind, level).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let value = roll_biased(range, level, &mut rng);
        prop_assert!(range.contains(value));
    }

    /// Every modifier on a dropped item fits the tier of its level.
    #[test]
    fn prop_dropped_modifiers_in_tier_range(
        level in 1u32..=120,
        rarity in rarity(),
        seed in any::<u64>(),
    ) {
        let catalog = ItemCatalog::builtin().unwrap();
        let loot = LootGenerator::new(&catalog);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        if let Some(item) = loot.roll_drop(level, None, Some(rarity), None, &mut rng) {
            prop_assert_eq!(item.level_requirement, level);
            for (modifier, _) in item.all_modifiers() {
                let range = loot.tiers().range_for_level(modifier.kind, level).unwrap();
                let (min, max) = modifier.bounds();
                prop_assert!(min <= max);
                prop_assert!(range.contains(min) && range.contains(max));
            }
        }
    }

    /// Dropped items carry an affix count allowed by their rarity.
    #[test]
    fn prop_affix_count_matches_rarity(
        level in 1u32..=120,
        rarity in rarity(),
        seed in any::<u64>(),
    ) {
        let catalog = ItemCatalog::builtin().unwrap();
        let loot = LootGenerator::new(&catalog);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        if let Some(item) = loot.roll_drop(level, None, Some(rarity), None, &mut rng) {
            let prefixes = item.affix_count(AffixKind::Prefix);
            let suffixes = item.affix_count(AffixKind::Suffix);
            let (low, high) = rarity.affix_bounds();
            prop_assert!((low..=high).contains(&(prefixes + suffixes)));
            prop_assert!(prefixes <= 3 && suffixes <= 3);
        }
    }

    /// The raw count roll respects the per-rarity shapes.
    #[test]
    fn prop_affix_counts_shape(rarity in rarity(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (prefixes, suffixes) = affix_counts(rarity, &mut rng);
        let (low, high) = rarity.affix_bounds();
        prop_assert!((low..=high).contains(&(prefixes + suffixes)));
        if rarity == Rarity::Rare {
            prop_assert!((1..=3).contains(&prefixes) && (1..=3).contains(&suffixes));
            prop_assert!(prefixes + suffixes >= 4);
        }
    }

    /// Armor mitigation rises with armor and falls with hit size.
    #[test]
    fn prop_armor_mitigation_monotonic(
        armor in 1.0f64..100_000.0,
        extra_armor in 1.0f64..10_000.0,
        damage in 1.0f64..10_000.0,
        extra_damage in 1.0f64..10_000.0,
    ) {
        let base = armor_mitigation(armor, damage, 10.0);
        prop_assert!(base > 0.0 && base < 1.0);
        prop_assert!(armor_mitigation(armor + extra_armor, damage, 10.0) > base);
        prop_assert!(armor_mitigation(armor, damage + extra_damage, 10.0) < base);
        prop_assert_eq!(armor_mitigation(0.0, damage, 10.0), 0.0);
    }
}
