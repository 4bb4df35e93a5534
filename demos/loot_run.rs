//! Short seeded run: farm a few drops, gear up, then take hits until the
//! character dies.
//!
//! ```text
//! RUST_LOG=riftcore=debug cargo run --example loot_run
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use riftcore::combat::{leech_healing, thorns_reflection};
use riftcore::*;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("loot_run=info".parse()?))
        .init();

    let catalog = ItemCatalog::builtin()?;
    let loot = LootGenerator::new(&catalog);
    let aggregator = Aggregator::new(&catalog);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let mut hero = Character::new("c1", "Aldren", CharacterClass::Warrior);
    for _ in 1..20 {
        hero.level_up();
    }
    hero.experience = 12_000;

    let wanted = [
        (ItemType::Sword, EquipmentSlot::MainHand),
        (ItemType::Shield, EquipmentSlot::OffHand),
        (ItemType::Helmet, EquipmentSlot::Helmet),
        (ItemType::BodyArmor, EquipmentSlot::BodyArmor),
        (ItemType::Ring, EquipmentSlot::LeftRing),
        (ItemType::Amulet, EquipmentSlot::Amulet),
    ];
    for (item_type, slot) in wanted {
        let Some(item) = loot.roll_drop(hero.level, Some(item_type), None, None, &mut rng) else {
            continue;
        };
        info!(name = %item.name, rarity = %item.rarity, "drop");
        for (modifier, implicit) in item.all_modifiers() {
            let tag = if implicit { " (implicit)" } else { "" };
            info!("    {}{}", modifier.describe(), tag);
        }
        hero.equip(item, slot)?;
    }

    if let Some(trophy) = loot.roll_drop(hero.level, None, None, Some("ember_king"), &mut rng) {
        info!(name = %trophy.name, "boss trophy");
        hero.equip(trophy, EquipmentSlot::Helmet)?;
    }

    let context = StatContext::new();
    let stats = aggregator.aggregate(&hero, &context);
    info!(
        dps = stats.dps,
        damage = %format!("{}-{}", stats.min_damage, stats.max_damage),
        health = stats.max_health,
        armor = stats.armor,
        fire_res = stats.fire_resistance,
        block = stats.block_chance,
        "aggregated"
    );
    hero.current_health = stats.max_health;
    hero.current_barrier = stats.max_barrier;

    let hits = [
        (40.0, DamageType::Physical),
        (55.0, DamageType::Fire),
        (30.0, DamageType::Cold),
        (120.0, DamageType::Void),
        (250.0, DamageType::Physical),
        (400.0, DamageType::Lightning),
    ];
    for (raw, damage_type) in hits {
        let result = resolve_incoming_damage(raw, damage_type, &hero, Some(&stats), &mut rng);
        result.updates.apply_to(&mut hero);
        info!(
            raw,
            ?damage_type,
            taken = result.final_damage,
            health = hero.current_health,
            reflected = thorns_reflection(&stats, true),
            leeched = leech_healing(raw, &stats),
            low = result.is_low_health,
            "hit"
        );
        if let Some(message) = result.death_message {
            info!("{}", message);
            break;
        }
    }

    info!(experience = hero.experience, area = %hero.area_id, "run complete");
    Ok(())
}
