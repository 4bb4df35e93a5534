//! # riftcore - Deterministic Action-RPG Stat, Combat and Loot Engine
//!
//! The numeric core of an action-RPG:
//! - **Stat aggregation**: a character plus equipped items become an
//!   immutable [`EffectiveStats`] snapshot
//! - **Combat resolution**: one incoming hit against that snapshot becomes a
//!   [`DamageResult`]
//! - **Item generation**: a monster level becomes a rolled [`Item`]
//!
//! All three are pure, synchronous functions of their inputs. Randomness is
//! always supplied by the caller, so a seeded RNG reproduces results bit for
//! bit.
//!
//! ## Core Concepts
//!
//! ### Stat Pipeline
//!
//! Character-wide stats flow through a dependency-ordered pipeline:
//!
//! ```text
//! [StatSource] → [StatTransform] → [ResolvedStat]
//! ```
//!
//! 1. **Sources** produce base values (additive): the character sheet,
//!    item base defences, rolled global modifiers
//! 2. **Transforms** modify values and may depend on other stats
//!    (attribute bonuses, percent-increase buckets, caps)
//! 3. **ResolvedStat** holds the final value with a full breakdown
//!
//! Transforms declare their dependencies, so stats resolve in topological
//! order and a circular rule set is reported instead of looping.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use riftcore::*;
//!
//! let catalog = ItemCatalog::builtin().unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! // Roll a weapon and equip it.
//! let loot = LootGenerator::new(&catalog);
//! let sword = loot
//!     .roll_drop(5, Some(ItemType::Sword), None, None, &mut rng)
//!     .unwrap();
//! let mut hero = Character::new("c1", "Aldren", CharacterClass::Warrior);
//! hero.equip(sword, EquipmentSlot::MainHand).unwrap();
//!
//! // Aggregate, then take a hit.
//! let stats = Aggregator::new(&catalog).aggregate(&hero, &StatContext::new());
//! assert!(stats.dps > 0.0);
//!
//! let result = resolve_incoming_damage(25.0, DamageType::Fire, &hero, Some(&stats), &mut rng);
//! result.updates.apply_to(&mut hero);
//! assert_eq!(hero.current_health, hero.base_max_health - 25.0);
//! ```
//!
//! ## Modules
//!
//! - [`aggregate`] - Stat aggregation engine
//! - [`combat`] - Incoming damage resolution, thorns and leech
//! - [`loot`] - Procedural item generation
//! - [`tier`] - Tiered modifier ranges and biased rolls
//! - [`character`], [`item`], [`modifier`] - Data model
//! - [`stat`], [`source`], [`transform`], [`resolver`], [`resolved`],
//!   [`graph`] - Dependency-ordered stat resolution
//! - [`config`], [`context`] - Balance constants and per-call inputs
//! - [`cache`], [`regen`] - Helpers for the host's tick
//! - [`error`] - Error types

pub mod aggregate;
pub mod cache;
pub mod character;
pub mod combat;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod item;
pub mod loot;
pub mod modifier;
pub mod numeric;
pub mod regen;
pub mod resolved;
pub mod resolver;
pub mod source;
pub mod stat;
pub mod tier;
pub mod transform;

// Re-export main types for convenience
pub use aggregate::{Aggregator, EffectiveStats, HandStats};
pub use cache::StatsCache;
pub use character::{Character, CharacterClass, EquipmentSlot};
pub use combat::{resolve_incoming_damage, CharacterUpdate, CombatResolver, DamageResult};
pub use config::EngineConfig;
pub use context::{ElementalInstance, StatContext};
pub use error::EngineError;
pub use item::{Item, ItemCatalog, ItemType, Rarity};
pub use loot::LootGenerator;
pub use modifier::{Modifier, ModifierType, ModifierValue};
pub use resolved::ResolvedStat;
pub use resolver::{ResolvedSheet, StatResolver};
pub use stat::{DamageType, Stat};
pub use tier::TierTable;

// Re-export numeric types
pub use numeric::StatValue;
