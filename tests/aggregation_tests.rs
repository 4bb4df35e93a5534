use riftcore::aggregate::DamageRange;
use riftcore::modifier::{Modifier, ModifierType};
use riftcore::*;

fn catalog() -> ItemCatalog {
    ItemCatalog::builtin().unwrap()
}

fn base_item(catalog: &ItemCatalog, base_id: &str) -> Item {
    Item::from_template(base_id, catalog.get(base_id).unwrap(), 1)
}

/// A character with every attribute and defence floor zeroed, so tests
/// only see what they equip.
fn bare(class: CharacterClass) -> Character {
    let mut c = Character::new("t", "Tester", class);
    c.strength = 0;
    c.dexterity = 0;
    c.intelligence = 0;
    c.base_armor = 0.0;
    c.base_evasion = 0.0;
    c
}

fn ring_with(catalog: &ItemCatalog, modifiers: &[Modifier]) -> Item {
    modifiers
        .iter()
        .fold(base_item(catalog, "iron_ring"), |item, m| item.with_modifier(*m))
}

/// Level 1, nothing equipped: unarmed defaults.
#[test]
fn test_level_one_unarmed() {
    let catalog = catalog();
    let hero = Character::new("c", "Hero", CharacterClass::Warrior);
    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(hero.level, 1);
    assert_eq!(stats.attack_speed, 1.0);
    assert_eq!(stats.min_damage, 0.0);
    assert_eq!(stats.max_damage, 0.0);
    assert!(!stats.is_dual_wielding);
}

/// A 10-20 weapon at 1.1 speed with 10 strength (+4% physical).
#[test]
fn test_weapon_scaled_by_strength() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    hero.strength = 10;
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::MainHand)
        .unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.attack_speed, 1.1);
    assert_eq!(stats.min_physical_damage, 10.0);
    assert_eq!(stats.max_physical_damage, 21.0);
    assert_eq!(stats.min_damage, 10.0);
    assert_eq!(stats.max_damage, 21.0);
    assert_eq!(stats.breakdown.weapon_local_physical.max, 20.0);
}

/// Resistances and block never exceed 75 whatever the modifier sum.
#[test]
fn test_resistances_and_block_capped() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    let heavy = [
        Modifier::scalar(ModifierType::FireResistance, 60.0),
        Modifier::scalar(ModifierType::AllResistances, 40.0),
        Modifier::scalar(ModifierType::BlockChance, 50.0),
    ];
    hero.equip(ring_with(&catalog, &heavy), EquipmentSlot::LeftRing).unwrap();
    hero.equip(ring_with(&catalog, &heavy), EquipmentSlot::RightRing).unwrap();
    hero.equip(base_item(&catalog, "tower_shield"), EquipmentSlot::OffHand)
        .unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.fire_resistance, 75.0);
    assert_eq!(stats.cold_resistance, 75.0);
    assert_eq!(stats.lightning_resistance, 75.0);
    assert_eq!(stats.void_resistance, 75.0);
    assert_eq!(stats.block_chance, 75.0);
}

/// Modest resistances pass through and fold in all-resistances.
#[test]
fn test_all_resistances_fold_into_each() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Ranger);
    let ring = ring_with(
        &catalog,
        &[
            Modifier::scalar(ModifierType::ColdResistance, 12.0),
            Modifier::scalar(ModifierType::AllResistances, 8.0),
        ],
    );
    hero.equip(ring, EquipmentSlot::LeftRing).unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.cold_resistance, 20.0);
    assert_eq!(stats.fire_resistance, 8.0);
    assert_eq!(stats.resistance(DamageType::Void), 8.0);
    assert_eq!(stats.resistance(DamageType::Physical), 0.0);
}

/// Two one-handed weapons: exactly +10% attack speed and physical damage
/// compared with the same pair evaluated without the bonus.
#[test]
fn test_dual_wield_bonus_is_ten_percent() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::MainHand)
        .unwrap();
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::OffHand)
        .unwrap();
    let aggregator = Aggregator::new(&catalog);

    let with_bonus = aggregator.aggregate(&hero, &StatContext::new());
    let without = aggregator.aggregate(&hero, &StatContext::new().with_dual_wield_bonus(false));

    assert!(with_bonus.is_dual_wielding);
    assert!(without.is_dual_wielding);
    assert!((with_bonus.attack_speed - without.attack_speed * 1.1).abs() < 1e-9);
    assert_eq!(without.min_physical_damage, 10.0);
    assert_eq!(without.max_physical_damage, 20.0);
    assert_eq!(with_bonus.min_physical_damage, 11.0);
    assert_eq!(with_bonus.max_physical_damage, 22.0);
    for (on, off) in with_bonus.hands.iter().zip(&without.hands) {
        assert!((on.speed - off.speed * 1.1).abs() < 1e-9);
    }
}

/// Dual-wield DPS is half of each hand, summed.
#[test]
fn test_dual_wield_dps_halves_each_hand() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::MainHand)
        .unwrap();
    hero.equip(base_item(&catalog, "rusty_sword"), EquipmentSlot::OffHand)
        .unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.hands.len(), 2);
    let expected = stats.hands[0].dps * 0.5 + stats.hands[1].dps * 0.5;
    assert!((stats.dps - expected).abs() < 1e-9);
    assert_eq!(stats.hands[1].template_id.as_deref(), Some("rusty_sword"));
}

/// A shield in the off hand is not dual wielding but adds block.
#[test]
fn test_sword_and_board() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::MainHand)
        .unwrap();
    hero.equip(base_item(&catalog, "wooden_shield"), EquipmentSlot::OffHand)
        .unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert!(!stats.is_dual_wielding);
    assert_eq!(stats.hands.len(), 1);
    assert_eq!(stats.block_chance, 15.0);
    assert_eq!(stats.armor, 8.0);
    assert_eq!(stats.max_physical_damage, 20.0);
}

/// Melee with the cold instance converts 30% of final physical to cold.
#[test]
fn test_cold_instance_converts_melee_physical() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::MainHand)
        .unwrap();

    let context = StatContext::new().with_instance(ElementalInstance::Cold);
    let stats = Aggregator::new(&catalog).aggregate(&hero, &context);
    let hand = &stats.hands[0];

    assert_eq!(hand.damage_of(DamageType::Physical).min, 7.0);
    assert_eq!(hand.damage_of(DamageType::Physical).max, 14.0);
    assert_eq!(hand.damage_of(DamageType::Cold).min, 3.0);
    assert_eq!(hand.damage_of(DamageType::Cold).max, 6.0);
    assert_eq!(stats.min_damage, 10.0);
    assert_eq!(stats.max_damage, 20.0);

    // Fire instance leaves melee physical alone.
    let fire = StatContext::new().with_instance(ElementalInstance::Fire);
    let stats = Aggregator::new(&catalog).aggregate(&hero, &fire);
    assert_eq!(stats.max_physical_damage, 20.0);
}

/// The caster's instance bonus needs enough mana; attribution does not.
#[test]
fn test_spell_instance_bonus_needs_mana() {
    let catalog = catalog();
    let staff = catalog.get("oak_staff").unwrap().clone();
    let mut mage = bare(CharacterClass::Mage);
    mage.equip(base_item(&catalog, "oak_staff"), EquipmentSlot::MainHand)
        .unwrap();
    let aggregator = Aggregator::new(&catalog);
    let context = StatContext::new().with_instance(ElementalInstance::Cold);

    mage.current_mana = 100.0;
    let sustained = aggregator.aggregate(&mage, &context);
    assert!(sustained.instance_bonus_active);
    assert!((sustained.cast_speed - staff.attack_speed * 1.1).abs() < 1e-9);
    assert_eq!(sustained.crit_chance, staff.crit_chance + 5.0);
    assert_eq!(
        sustained.hands[0].damage_of(DamageType::Cold).max,
        staff.max_damage
    );

    mage.current_mana = 0.0;
    let starved = aggregator.aggregate(&mage, &context);
    assert!(!starved.instance_bonus_active);
    assert_eq!(starved.cast_speed, staff.attack_speed);
    assert_eq!(starved.crit_chance, staff.crit_chance);
    assert_eq!(
        starved.hands[0].damage_of(DamageType::Cold).max,
        staff.max_damage
    );
    assert_eq!(starved.max_physical_damage, 0.0);
}

/// Dexterity and intelligence bonuses.
#[test]
fn test_attribute_derived_bonuses() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Ranger);
    hero.dexterity = 10;
    hero.intelligence = 14;
    hero.base_evasion = 100.0;

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    // +2 crit points on the unarmed base of 5
    assert_eq!(stats.crit_chance, 7.0);
    // +4% evasion
    assert_eq!(stats.evasion, 104.0);
    // +5 barrier per full 5 intelligence
    assert_eq!(stats.max_barrier, 10.0);
}

/// Equipment attributes count toward the attribute bonuses.
#[test]
fn test_equipment_attributes_feed_bonuses() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    hero.strength = 3;
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::MainHand)
        .unwrap();
    let amulet = base_item(&catalog, "jade_amulet")
        .with_implicit(Modifier::scalar(ModifierType::Strength, 7.0));
    hero.equip(amulet, EquipmentSlot::Amulet).unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.strength, 10.0);
    assert_eq!(stats.max_physical_damage, 21.0);
}

/// Armor bases are scaled by their own local increase only.
#[test]
fn test_armor_local_increase() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    let helm = base_item(&catalog, "iron_helm")
        .with_modifier(Modifier::scalar(ModifierType::LocalIncreasedArmor, 50.0));
    hero.equip(helm, EquipmentSlot::Helmet).unwrap();
    hero.equip(base_item(&catalog, "gauntlets"), EquipmentSlot::Gloves)
        .unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    // 30 * 1.5 + 20
    assert_eq!(stats.armor, 65.0);
}

/// Global flat damage is added to each hand before the increase buckets.
#[test]
fn test_global_flat_damage_per_hand() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::MainHand)
        .unwrap();
    hero.equip(base_item(&catalog, "training_sword"), EquipmentSlot::OffHand)
        .unwrap();
    let ring = ring_with(
        &catalog,
        &[Modifier::range(ModifierType::AddedPhysicalDamage, 2.0, 4.0)],
    );
    hero.equip(ring, EquipmentSlot::LeftRing).unwrap();

    let context = StatContext::new().with_dual_wield_bonus(false);
    let stats = Aggregator::new(&catalog).aggregate(&hero, &context);

    for hand in &stats.hands {
        assert_eq!(hand.damage_of(DamageType::Physical).min, 12.0);
        assert_eq!(hand.damage_of(DamageType::Physical).max, 24.0);
    }
    assert_eq!(stats.breakdown.global_flat_physical.min, 2.0);
    assert_eq!(stats.breakdown.global_flat_physical.max, 4.0);
}

/// Elemental increases stack the global and per-element buckets.
#[test]
fn test_elemental_increase_buckets_stack() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    let ring = ring_with(
        &catalog,
        &[
            Modifier::range(ModifierType::AddedFireDamage, 10.0, 20.0),
            Modifier::scalar(ModifierType::IncreasedElementalDamage, 20.0),
            Modifier::scalar(ModifierType::IncreasedFireDamage, 30.0),
            Modifier::scalar(ModifierType::IncreasedColdDamage, 90.0),
        ],
    );
    hero.equip(ring, EquipmentSlot::RightRing).unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.min_elemental_damage, 15.0);
    assert_eq!(stats.max_elemental_damage, 30.0);
    assert_eq!(stats.min_physical_damage, 0.0);
}

/// An item whose template is missing contributes no damage and does not
/// panic.
#[test]
fn test_missing_template_contributes_zero() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    let mut ghost = base_item(&catalog, "training_sword");
    ghost.base_id = "no_such_template".into();
    hero.equip(ghost, EquipmentSlot::MainHand).unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert!(stats.hands[0].template_id.is_none());
    assert_eq!(stats.max_damage, 0.0);
    assert_eq!(stats.attack_speed, 1.0);
}

/// Only the Mage has a mana pool.
#[test]
fn test_mana_only_for_mage() {
    let catalog = catalog();
    let mana_ring = [Modifier::scalar(ModifierType::MaxMana, 30.0)];

    let mut warrior = bare(CharacterClass::Warrior);
    warrior
        .equip(ring_with(&catalog, &mana_ring), EquipmentSlot::LeftRing)
        .unwrap();
    let mut mage = bare(CharacterClass::Mage);
    mage.equip(ring_with(&catalog, &mana_ring), EquipmentSlot::LeftRing)
        .unwrap();

    let aggregator = Aggregator::new(&catalog);
    assert_eq!(aggregator.aggregate(&warrior, &StatContext::new()).max_mana, 0.0);
    assert_eq!(aggregator.aggregate(&mage, &StatContext::new()).max_mana, 130.0);
}

/// Utility caps: mana shield 10, reduced physical 75, reduced leech 100.
#[test]
fn test_utility_caps() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    let ring = ring_with(
        &catalog,
        &[
            Modifier::scalar(ModifierType::ManaShield, 25.0),
            Modifier::scalar(ModifierType::ReducedPhysicalTaken, 90.0),
            Modifier::scalar(ModifierType::ReducedLeechRecovery, 150.0),
            Modifier::scalar(ModifierType::PhysicalTakenAsElemental, 130.0),
        ],
    );
    hero.equip(ring, EquipmentSlot::LeftRing).unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.mana_shield, 10.0);
    assert_eq!(stats.reduced_physical_taken, 75.0);
    assert_eq!(stats.reduced_leech_recovery, 100.0);
    assert_eq!(stats.physical_taken_as_elemental, 100.0);
}

/// Aggregation is a pure function: same input, same snapshot.
#[test]
fn test_aggregation_is_deterministic() {
    let catalog = catalog();
    let mut hero = Character::new("c", "Hero", CharacterClass::Ranger);
    hero.equip(base_item(&catalog, "hunting_bow"), EquipmentSlot::MainHand)
        .unwrap();
    hero.equip(base_item(&catalog, "leather_vest"), EquipmentSlot::BodyArmor)
        .unwrap();
    let aggregator = Aggregator::new(&catalog);
    let context = StatContext::new().with_instance(ElementalInstance::Lightning);

    assert_eq!(
        aggregator.aggregate(&hero, &context),
        aggregator.aggregate(&hero, &context)
    );
}

/// The boss crown's fixed modifiers flow through aggregation.
#[test]
fn test_boss_item_aggregates() {
    let catalog = catalog();
    let crown = catalog.get("crown_of_embers").unwrap();
    let boss = crown.boss.clone().unwrap();
    let mut item = Item::from_template("crown", crown, 60).with_rarity(Rarity::Legendary);
    item.modifiers = boss.modifiers.clone();
    item.implicit = boss.implicit;
    let mut hero = bare(CharacterClass::Mage);
    hero.equip(item, EquipmentSlot::Helmet).unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());

    assert_eq!(stats.fire_resistance, 40.0);
    assert_eq!(stats.thorns, 18.0);
    assert_eq!(stats.max_health, 80.0 + 60.0);
    // 20 base barrier * 1.5 local increase
    assert_eq!(stats.max_barrier, 30.0);
    assert_eq!(stats.armor, 20.0);
}

/// Unarmed melee converts to cold under the Cold instance like any other
/// non-spell hand.
#[test]
fn test_cold_instance_converts_unarmed_physical() {
    let catalog = catalog();
    let mut hero = bare(CharacterClass::Warrior);
    let ring = ring_with(
        &catalog,
        &[Modifier::range(ModifierType::AddedPhysicalDamage, 10.0, 10.0)],
    );
    hero.equip(ring, EquipmentSlot::LeftRing).unwrap();

    let cold = StatContext::new().with_instance(ElementalInstance::Cold);
    let stats = Aggregator::new(&catalog).aggregate(&hero, &cold);
    let hand = stats.primary_hand().unwrap();

    assert!(hand.template_id.is_none());
    assert_eq!(hand.damage_of(DamageType::Physical), DamageRange::new(7.0, 7.0));
    assert_eq!(hand.damage_of(DamageType::Cold), DamageRange::new(3.0, 3.0));
    assert_eq!(stats.min_damage, 10.0);

    let plain = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());
    assert_eq!(plain.max_physical_damage, 10.0);
}

/// Dual-wielded spell weapons keep their cast speed; the bonus is for
/// attack speed only.
#[test]
fn test_dual_wield_bonus_skips_cast_speed() {
    let catalog = catalog();
    let wand = catalog.get("bone_wand").unwrap().clone();
    let mut mage = bare(CharacterClass::Mage);
    mage.equip(base_item(&catalog, "bone_wand"), EquipmentSlot::MainHand)
        .unwrap();
    mage.equip(base_item(&catalog, "bone_wand"), EquipmentSlot::OffHand)
        .unwrap();
    let aggregator = Aggregator::new(&catalog);

    let on = aggregator.aggregate(&mage, &StatContext::new());
    let off = aggregator.aggregate(&mage, &StatContext::new().with_dual_wield_bonus(false));

    assert!(on.is_dual_wielding);
    assert_eq!(on.cast_speed, wand.attack_speed);
    assert_eq!(on.cast_speed, off.cast_speed);
    for hand in &on.hands {
        assert_eq!(hand.speed, wand.attack_speed);
    }
}

/// A spell weapon's speed is reported as cast speed, not attack speed.
#[test]
fn test_spell_weapon_speed_is_cast_speed() {
    let catalog = catalog();
    let staff = catalog.get("oak_staff").unwrap().clone();
    let mut mage = bare(CharacterClass::Mage);
    mage.equip(base_item(&catalog, "oak_staff"), EquipmentSlot::MainHand)
        .unwrap();

    let stats = Aggregator::new(&catalog).aggregate(&mage, &StatContext::new());

    assert_eq!(stats.cast_speed, staff.attack_speed);
    assert_eq!(stats.attack_speed, 1.0);
}
