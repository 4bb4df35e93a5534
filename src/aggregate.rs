//! Stat aggregation module.
//!
//! Turns a `Character` and its equipped items into an immutable
//! `EffectiveStats` snapshot. The pipeline runs in a fixed order:
//!
//! ```text
//! [weapon-local resolution] -> [global buckets + attribute rules (StatResolver)]
//!     -> [per-hand combine] -> [instance conversion] -> [dual wield] -> [DPS]
//! ```
//!
//! Additive buckets always land before "more" multipliers. Aggregation is
//! a pure function of its inputs: no RNG, no hidden state, and the
//! snapshot is rebuilt from scratch every time.

use crate::character::{Character, EquipmentSlot};
use crate::config::AggregationConfig;
use crate::context::{ElementalInstance, StatContext};
use crate::item::{Item, ItemCatalog, ItemTemplate};
use crate::modifier::ModifierEffect;
use crate::numeric::{
    increased_multiplier, more_multiplier, round_stat, rounded_range, StatValue,
};
use crate::resolver::{ResolvedSheet, StatResolver};
use crate::source::{ConstantSource, ModifierSource, TemplateSource};
use crate::stat::{DamageType, Stat};
use crate::transform::{ClampTransform, IncreasedByTransform, PerStepTransform, ScalingTransform};
use tracing::{trace, warn};

/// A (min, max) damage pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageRange {
    pub min: StatValue,
    pub max: StatValue,
}

impl DamageRange {
    pub fn new(min: StatValue, max: StatValue) -> Self {
        Self { min, max }
    }

    pub fn average(&self) -> StatValue {
        (self.min + self.max) / 2.0
    }

    fn add(self, other: DamageRange) -> Self {
        Self::new(self.min + other.min, self.max + other.max)
    }

    fn scale(self, factor: StatValue) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    fn rounded(self) -> Self {
        let (min, max) = rounded_range(self.min, self.max);
        Self::new(min, max)
    }
}

/// Final offensive numbers of one hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandStats {
    pub slot: EquipmentSlot,
    /// `None` when the hand is unarmed.
    pub template_id: Option<String>,
    pub is_spell: bool,
    /// Damage per type, indexed by [`DamageType::index`].
    pub damage: [DamageRange; 5],
    pub min_damage: StatValue,
    pub max_damage: StatValue,
    /// Attacks per second, or casts per second for spell weapons.
    pub speed: StatValue,
    pub crit_chance: StatValue,
    pub crit_multiplier: StatValue,
    pub dps: StatValue,
}

impl HandStats {
    /// The damage range of one type.
    pub fn damage_of(&self, damage_type: DamageType) -> DamageRange {
        self.damage[damage_type.index()]
    }

    /// Summed fire, cold, lightning and void damage.
    pub fn elemental(&self) -> DamageRange {
        DamageType::ALL
            .iter()
            .filter(|t| t.is_elemental())
            .fold(DamageRange::default(), |acc, t| acc.add(self.damage_of(*t)))
    }
}

/// Display-only breakdown fields. Never read back by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBreakdown {
    /// Primary hand's physical damage after local modifiers only.
    pub weapon_local_physical: DamageRange,
    /// Flat physical damage added by global modifiers.
    pub global_flat_physical: DamageRange,
    /// Per-stat source and transform breakdown.
    pub resolved: ResolvedSheet,
}

/// The aggregated, read-only stats snapshot of a character.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStats {
    /// One entry per attacking hand; a single unarmed hand when no weapon
    /// resolves.
    pub hands: Vec<HandStats>,
    pub min_physical_damage: StatValue,
    pub max_physical_damage: StatValue,
    pub min_elemental_damage: StatValue,
    pub max_elemental_damage: StatValue,
    pub min_damage: StatValue,
    pub max_damage: StatValue,
    pub attack_speed: StatValue,
    pub cast_speed: StatValue,
    pub crit_chance: StatValue,
    pub crit_multiplier: StatValue,
    pub dps: StatValue,
    pub is_dual_wielding: bool,
    /// Whether the active instance's speed/crit bonus is applied.
    pub instance_bonus_active: bool,

    pub strength: StatValue,
    pub dexterity: StatValue,
    pub intelligence: StatValue,

    pub max_health: StatValue,
    pub max_mana: StatValue,
    pub max_barrier: StatValue,
    pub armor: StatValue,
    pub evasion: StatValue,
    pub fire_resistance: StatValue,
    pub cold_resistance: StatValue,
    pub lightning_resistance: StatValue,
    pub void_resistance: StatValue,
    pub block_chance: StatValue,
    pub health_regen: StatValue,
    pub mana_regen: StatValue,

    pub life_leech: StatValue,
    pub reduced_leech_recovery: StatValue,
    pub thorns: StatValue,
    pub mana_shield: StatValue,
    pub reduced_physical_taken: StatValue,
    pub physical_taken_as_elemental: StatValue,
    pub movement_speed: StatValue,

    pub breakdown: StatBreakdown,
}

impl EffectiveStats {
    /// Resistance against a damage type; physical has none.
    pub fn resistance(&self, damage_type: DamageType) -> StatValue {
        match damage_type {
            DamageType::Physical => 0.0,
            DamageType::Fire => self.fire_resistance,
            DamageType::Cold => self.cold_resistance,
            DamageType::Lightning => self.lightning_resistance,
            DamageType::Void => self.void_resistance,
        }
    }

    /// The hand that supplies the top-level damage, speed and crit fields.
    pub fn primary_hand(&self) -> Option<&HandStats> {
        self.hands.first()
    }
}

/// Result of resolving one weapon against only its own modifiers.
#[derive(Debug, Clone)]
struct LocalWeapon {
    slot: EquipmentSlot,
    template_id: String,
    is_spell: bool,
    two_handed: bool,
    damage: [DamageRange; 5],
    speed: StatValue,
    crit_chance: StatValue,
}

/// Builds `EffectiveStats` from a character.
///
/// # Examples
///
/// ```rust
/// use riftcore::aggregate::Aggregator;
/// use riftcore::character::{Character, CharacterClass};
/// use riftcore::item::ItemCatalog;
/// use riftcore::StatContext;
///
/// let catalog = ItemCatalog::builtin().unwrap();
/// let aggregator = Aggregator::new(&catalog);
/// let hero = Character::new("c1", "Aldren", CharacterClass::Warrior);
///
/// let stats = aggregator.aggregate(&hero, &StatContext::new());
/// assert_eq!(stats.attack_speed, 1.0);
/// assert_eq!(stats.min_damage, 0.0);
/// assert_eq!(stats.max_damage, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator<'a> {
    catalog: &'a ItemCatalog,
    config: AggregationConfig,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator with the default balance constants.
    pub fn new(catalog: &'a ItemCatalog) -> Self {
        Self {
            catalog,
            config: AggregationConfig::default(),
        }
    }

    /// Replace the balance constants.
    pub fn with_config(mut self, config: AggregationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Compute the full stats snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the built-in stat rules form a dependency cycle, which
    /// can only happen through a programming error in this module.
    pub fn aggregate(&self, character: &Character, context: &StatContext) -> EffectiveStats {
        let weapons = self.resolve_weapons(character, context);

        let resolver = self.build_resolver(character);
        let sheet = resolver
            .resolve_all()
            .unwrap_or_else(|err| panic!("stat rule set is inconsistent: {}", err));

        let is_dual_wielding = weapons.len() == 2 && weapons.iter().all(|w| !w.two_handed);
        let dual_bonus = is_dual_wielding && context.dual_wield_bonus();

        let uses_spell = weapons.first().map_or(false, |w| w.is_spell);
        let instance_bonus_active = uses_spell
            && context.instance().is_some()
            && character.current_mana >= self.config.instance_mana_upkeep;

        let hands: Vec<HandStats> = if weapons.is_empty() {
            vec![self.unarmed_hand(&sheet, context)]
        } else {
            weapons
                .iter()
                .map(|w| self.finalize_hand(w, &sheet, context, dual_bonus, instance_bonus_active))
                .collect()
        };

        let mut stats = self.finish(character, &hands, &sheet);
        stats.hands = hands;
        stats.dps = if is_dual_wielding {
            stats.hands.iter().map(|h| h.dps * 0.5).sum()
        } else {
            stats.primary_hand().map_or(0.0, |h| h.dps)
        };
        stats.is_dual_wielding = is_dual_wielding;
        stats.instance_bonus_active = instance_bonus_active;
        stats.breakdown = StatBreakdown {
            weapon_local_physical: weapons
                .first()
                .map_or_else(DamageRange::default, |w| w.damage[DamageType::Physical.index()]),
            global_flat_physical: global_flat(&sheet, DamageType::Physical),
            resolved: sheet,
        };

        trace!(
            character = %character.id,
            dps = stats.dps,
            min = stats.min_damage,
            max = stats.max_damage,
            "aggregated stats"
        );
        stats
    }

    fn resolve_weapons(&self, character: &Character, context: &StatContext) -> Vec<LocalWeapon> {
        EquipmentSlot::ALL
            .into_iter()
            .filter(|slot| slot.is_hand())
            .filter_map(|slot| {
                let item = character.equipment.get(slot)?;
                if !item.item_type.is_weapon() {
                    return None;
                }
                let template = self.template_for(slot, item)?;
                Some(self.resolve_weapon(slot, item, template, context))
            })
            .collect()
    }

    fn template_for(&self, slot: EquipmentSlot, item: &Item) -> Option<&'a ItemTemplate> {
        let template = self.catalog.get(&item.base_id);
        if template.is_none() {
            warn!(
                item = %item.id,
                base_id = %item.base_id,
                slot = %slot,
                "equipped item references an unknown template; treating its base as zero"
            );
        }
        template
    }

    /// Step 1: a weapon's own base numbers plus its own local modifiers.
    fn resolve_weapon(
        &self,
        slot: EquipmentSlot,
        item: &Item,
        template: &ItemTemplate,
        context: &StatContext,
    ) -> LocalWeapon {
        let mut damage = [DamageRange::default(); 5];
        let base_type = if template.is_spell() {
            context
                .instance()
                .unwrap_or(ElementalInstance::Fire)
                .damage_type()
        } else {
            DamageType::Physical
        };
        damage[base_type.index()] = DamageRange::new(template.min_damage, template.max_damage);

        let mut increased_physical = 0.0;
        let mut increased_speed = 0.0;
        let mut increased_crit = 0.0;
        for (modifier, _) in item.all_modifiers() {
            match modifier.kind.effect() {
                ModifierEffect::LocalDamage(damage_type) => {
                    let (min, max) = modifier.bounds();
                    let entry = &mut damage[damage_type.index()];
                    *entry = entry.add(DamageRange::new(min, max));
                }
                ModifierEffect::LocalIncreasedPhysical => increased_physical += modifier.amount(),
                ModifierEffect::LocalAttackSpeed => increased_speed += modifier.amount(),
                ModifierEffect::LocalCritChance => increased_crit += modifier.amount(),
                ModifierEffect::LocalIncreasedDefence(_)
                | ModifierEffect::Global(_)
                | ModifierEffect::GlobalRange(..) => {}
            }
        }

        let physical = DamageType::Physical.index();
        damage[physical] = damage[physical].scale(increased_multiplier(increased_physical));
        for range in damage.iter_mut() {
            *range = range.rounded();
        }

        LocalWeapon {
            slot,
            template_id: template.id.clone(),
            is_spell: template.is_spell(),
            two_handed: template.item_type.is_two_handed(),
            damage,
            speed: template.attack_speed * increased_multiplier(increased_speed),
            crit_chance: template.crit_chance * increased_multiplier(increased_crit),
        }
    }

    /// Steps 2 and 3: global buckets and attribute-derived rules.
    fn build_resolver(&self, character: &Character) -> StatResolver {
        let cfg = &self.config;
        let mut resolver = StatResolver::new();

        let base: [(Stat, &'static str, StatValue); 8] = [
            (Stat::Strength, "base strength", f64::from(character.strength)),
            (Stat::Dexterity, "base dexterity", f64::from(character.dexterity)),
            (Stat::Intelligence, "base intelligence", f64::from(character.intelligence)),
            (Stat::MaxHealth, "base max health", character.base_max_health),
            (
                Stat::MaxMana,
                "base max mana",
                if character.class.uses_mana() {
                    character.base_max_mana
                } else {
                    0.0
                },
            ),
            (Stat::Armor, "base armor", character.base_armor),
            (Stat::Evasion, "base evasion", character.base_evasion),
            (Stat::CritMultiplier, "base crit multiplier", cfg.base_crit_multiplier),
        ];
        for (stat, label, value) in base {
            resolver.register_source(stat, Box::new(ConstantSource::new(label, value)));
        }

        for (slot, item) in character.equipment.iter() {
            self.register_item(&mut resolver, slot, item);
        }

        resolver.register_transform(
            Stat::IncreasedPhysical,
            Box::new(PerStepTransform::new(
                Stat::Strength,
                cfg.strength_step,
                cfg.strength_increased_physical,
            )),
        );
        resolver.register_transform(
            Stat::IncreasedEvasion,
            Box::new(PerStepTransform::new(
                Stat::Dexterity,
                cfg.dexterity_step,
                cfg.dexterity_increased_evasion,
            )),
        );
        resolver.register_transform(
            Stat::CritChance,
            Box::new(PerStepTransform::new(
                Stat::Dexterity,
                cfg.dexterity_step,
                cfg.dexterity_crit_chance,
            )),
        );
        resolver.register_transform(
            Stat::Barrier,
            Box::new(PerStepTransform::new(
                Stat::Intelligence,
                cfg.intelligence_step,
                cfg.intelligence_barrier,
            )),
        );

        for (stat, increased) in [
            (Stat::Armor, Stat::IncreasedArmor),
            (Stat::Evasion, Stat::IncreasedEvasion),
            (Stat::Barrier, Stat::IncreasedBarrier),
        ] {
            resolver.register_transform(stat, Box::new(IncreasedByTransform::new(increased)));
            resolver.register_transform(stat, Box::new(ClampTransform::with_min(0.0)));
        }

        for stat in DamageType::ALL
            .into_iter()
            .filter_map(DamageType::resistance_stat)
        {
            resolver.register_transform(
                stat,
                Box::new(ScalingTransform::new(Stat::AllResistances, 1.0)),
            );
            resolver.register_transform(stat, Box::new(ClampTransform::new(0.0, cfg.resistance_cap)));
        }

        let caps = [
            (Stat::BlockChance, cfg.block_cap),
            (Stat::ManaShield, cfg.mana_shield_cap),
            (Stat::ReducedPhysicalTaken, cfg.reduced_physical_taken_cap),
            (Stat::PhysicalTakenAsElemental, cfg.physical_taken_as_elemental_cap),
            (Stat::ReducedLeechRecovery, cfg.reduced_leech_recovery_cap),
        ];
        for (stat, cap) in caps {
            resolver.register_transform(stat, Box::new(ClampTransform::new(0.0, cap)));
        }

        for stat in [
            Stat::MaxHealth,
            Stat::MaxMana,
            Stat::HealthRegen,
            Stat::ManaRegen,
            Stat::LifeLeech,
            Stat::Thorns,
        ] {
            resolver.register_transform(stat, Box::new(ClampTransform::with_min(0.0)));
        }

        resolver
    }

    fn register_item(&self, resolver: &mut StatResolver, slot: EquipmentSlot, item: &Item) {
        for (modifier, implicit) in item.all_modifiers() {
            for (stat, value) in modifier.contributions() {
                resolver.register_source(
                    stat,
                    Box::new(ModifierSource::new(slot, modifier.kind, implicit, value)),
                );
            }
        }

        if item.item_type.is_weapon() {
            return;
        }
        let Some(template) = self.template_for(slot, item) else {
            return;
        };

        let local_increase = |stat: Stat| -> StatValue {
            item.all_modifiers()
                .filter(|(m, _)| m.kind.effect() == ModifierEffect::LocalIncreasedDefence(stat))
                .map(|(m, _)| m.amount())
                .sum()
        };
        let defences = [
            (Stat::Armor, template.armor),
            (Stat::Evasion, template.evasion),
            (Stat::Barrier, template.barrier),
        ];
        for (stat, base) in defences {
            if base > 0.0 {
                let value = round_stat(base * increased_multiplier(local_increase(stat)));
                resolver.register_source(
                    stat,
                    Box::new(TemplateSource::new(slot, template.id.clone(), value)),
                );
            }
        }
        if template.block_chance > 0.0 {
            resolver.register_source(
                Stat::BlockChance,
                Box::new(TemplateSource::new(slot, template.id.clone(), template.block_chance)),
            );
        }
    }

    fn unarmed_hand(&self, sheet: &ResolvedSheet, context: &StatContext) -> HandStats {
        let mut damage = [DamageRange::default(); 5];
        for damage_type in DamageType::ALL {
            damage[damage_type.index()] =
                scaled_damage(sheet, damage_type, DamageRange::default(), 1.0);
        }
        self.convert_to_cold(&mut damage, context);
        let speed = self.config.unarmed_attack_speed
            * increased_multiplier(sheet.value(Stat::IncreasedAttackSpeed));
        let crit_chance = (self.config.unarmed_crit_chance + sheet.value(Stat::CritChance))
            * increased_multiplier(sheet.value(Stat::IncreasedCritChance));
        build_hand(
            EquipmentSlot::MainHand,
            None,
            false,
            damage,
            speed,
            crit_chance,
            sheet.value(Stat::CritMultiplier),
        )
    }

    /// Steps 4 to 6 for one weapon.
    fn finalize_hand(
        &self,
        weapon: &LocalWeapon,
        sheet: &ResolvedSheet,
        context: &StatContext,
        dual_bonus: bool,
        instance_bonus: bool,
    ) -> HandStats {
        let cfg = &self.config;
        let physical_more = if dual_bonus {
            more_multiplier(cfg.dual_wield_more)
        } else {
            1.0
        };

        let mut damage = [DamageRange::default(); 5];
        for damage_type in DamageType::ALL {
            let more = if damage_type == DamageType::Physical {
                physical_more
            } else {
                1.0
            };
            damage[damage_type.index()] =
                scaled_damage(sheet, damage_type, weapon.damage[damage_type.index()], more);
        }

        if !weapon.is_spell {
            self.convert_to_cold(&mut damage, context);
        }

        let mut speed = if weapon.is_spell {
            weapon.speed * increased_multiplier(sheet.value(Stat::IncreasedCastSpeed))
        } else {
            weapon.speed * increased_multiplier(sheet.value(Stat::IncreasedAttackSpeed))
        };
        if weapon.is_spell && instance_bonus {
            speed *= more_multiplier(cfg.instance_cast_speed_more);
        }
        if dual_bonus && !weapon.is_spell {
            speed *= more_multiplier(cfg.dual_wield_more);
        }

        let mut crit_chance = (weapon.crit_chance + sheet.value(Stat::CritChance))
            * increased_multiplier(sheet.value(Stat::IncreasedCritChance));
        if weapon.is_spell && instance_bonus {
            crit_chance += cfg.instance_crit_chance;
        }

        build_hand(
            weapon.slot,
            Some(weapon.template_id.clone()),
            weapon.is_spell,
            damage,
            speed,
            crit_chance,
            sheet.value(Stat::CritMultiplier),
        )
    }

    /// Step 4 for melee hands: part of final physical becomes cold while
    /// the Cold instance is active.
    fn convert_to_cold(&self, damage: &mut [DamageRange; 5], context: &StatContext) {
        if context.instance() != Some(ElementalInstance::Cold) {
            return;
        }
        let percent = self.config.cold_conversion_percent;
        let physical = damage[DamageType::Physical.index()];
        let converted = DamageRange::new(
            round_stat(physical.min * percent / 100.0),
            round_stat(physical.max * percent / 100.0),
        );
        damage[DamageType::Physical.index()] =
            DamageRange::new(physical.min - converted.min, physical.max - converted.max);
        let cold = &mut damage[DamageType::Cold.index()];
        *cold = cold.add(converted);
    }

    fn finish(
        &self,
        character: &Character,
        hands: &[HandStats],
        sheet: &ResolvedSheet,
    ) -> EffectiveStats {
        let primary = hands.first();
        let physical = primary.map_or_else(DamageRange::default, |h| {
            h.damage_of(DamageType::Physical)
        });
        let elemental = primary.map_or_else(DamageRange::default, HandStats::elemental);

        let attack_speed = match primary {
            Some(hand) if !hand.is_spell => hand.speed,
            _ => {
                self.config.unarmed_attack_speed
                    * increased_multiplier(sheet.value(Stat::IncreasedAttackSpeed))
            }
        };
        let cast_speed = match primary {
            Some(hand) if hand.is_spell => hand.speed,
            _ => {
                self.config.base_cast_speed
                    * increased_multiplier(sheet.value(Stat::IncreasedCastSpeed))
            }
        };

        let uses_mana = character.class.uses_mana();
        EffectiveStats {
            hands: Vec::new(),
            min_physical_damage: physical.min,
            max_physical_damage: physical.max,
            min_elemental_damage: elemental.min,
            max_elemental_damage: elemental.max,
            min_damage: primary.map_or(0.0, |h| h.min_damage),
            max_damage: primary.map_or(0.0, |h| h.max_damage),
            attack_speed,
            cast_speed,
            crit_chance: primary.map_or(0.0, |h| h.crit_chance),
            crit_multiplier: sheet.value(Stat::CritMultiplier),
            dps: 0.0,
            is_dual_wielding: false,
            instance_bonus_active: false,
            strength: sheet.value(Stat::Strength),
            dexterity: sheet.value(Stat::Dexterity),
            intelligence: sheet.value(Stat::Intelligence),
            max_health: round_stat(sheet.value(Stat::MaxHealth)),
            max_mana: if uses_mana {
                round_stat(sheet.value(Stat::MaxMana))
            } else {
                0.0
            },
            max_barrier: round_stat(sheet.value(Stat::Barrier)),
            armor: round_stat(sheet.value(Stat::Armor)),
            evasion: round_stat(sheet.value(Stat::Evasion)),
            fire_resistance: sheet.value(Stat::FireResistance),
            cold_resistance: sheet.value(Stat::ColdResistance),
            lightning_resistance: sheet.value(Stat::LightningResistance),
            void_resistance: sheet.value(Stat::VoidResistance),
            block_chance: sheet.value(Stat::BlockChance),
            health_regen: sheet.value(Stat::HealthRegen),
            mana_regen: if uses_mana {
                sheet.value(Stat::ManaRegen)
            } else {
                0.0
            },
            life_leech: sheet.value(Stat::LifeLeech),
            reduced_leech_recovery: sheet.value(Stat::ReducedLeechRecovery),
            thorns: sheet.value(Stat::Thorns),
            mana_shield: sheet.value(Stat::ManaShield),
            reduced_physical_taken: sheet.value(Stat::ReducedPhysicalTaken),
            physical_taken_as_elemental: sheet.value(Stat::PhysicalTakenAsElemental),
            movement_speed: sheet.value(Stat::MovementSpeed),
            breakdown: StatBreakdown {
                weapon_local_physical: DamageRange::default(),
                global_flat_physical: DamageRange::default(),
                resolved: ResolvedSheet::default(),
            },
        }
    }
}

fn global_flat(sheet: &ResolvedSheet, damage_type: DamageType) -> DamageRange {
    let (min, max) = damage_type.added_stats();
    DamageRange::new(sheet.value(min), sheet.value(max))
}

/// Local + global flat, times the summed increase buckets, times `more`,
/// rounded.
fn scaled_damage(
    sheet: &ResolvedSheet,
    damage_type: DamageType,
    local: DamageRange,
    more: StatValue,
) -> DamageRange {
    let mut increased = sheet.value(damage_type.increased_stat());
    if damage_type.is_elemental() {
        increased += sheet.value(Stat::IncreasedElemental);
    }
    local
        .add(global_flat(sheet, damage_type))
        .scale(increased_multiplier(increased) * more)
        .rounded()
}

/// Expected damage per second with crit chance capped at 100% for the
/// formula.
pub fn expected_dps(
    average_damage: StatValue,
    speed: StatValue,
    crit_chance: StatValue,
    crit_multiplier: StatValue,
) -> StatValue {
    let crit = crit_chance.clamp(0.0, 100.0) / 100.0;
    average_damage * speed * (1.0 + crit * (crit_multiplier / 100.0 - 1.0))
}

fn build_hand(
    slot: EquipmentSlot,
    template_id: Option<String>,
    is_spell: bool,
    damage: [DamageRange; 5],
    speed: StatValue,
    crit_chance: StatValue,
    crit_multiplier: StatValue,
) -> HandStats {
    let min_damage = damage.iter().map(|d| d.min).sum();
    let max_damage = damage.iter().map(|d| d.max).sum();
    let dps = expected_dps(
        (min_damage + max_damage) / 2.0,
        speed,
        crit_chance,
        crit_multiplier,
    );
    HandStats {
        slot,
        template_id,
        is_spell,
        damage,
        min_damage,
        max_damage,
        speed,
        crit_chance,
        crit_multiplier,
        dps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::modifier::{Modifier, ModifierType};

    fn catalog() -> ItemCatalog {
        ItemCatalog::builtin().unwrap()
    }

    fn bare(class: CharacterClass) -> Character {
        let mut c = Character::new("t", "Tester", class);
        c.strength = 0;
        c.dexterity = 0;
        c.intelligence = 0;
        c.base_armor = 0.0;
        c.base_evasion = 0.0;
        c
    }

    #[test]
    fn test_expected_dps_caps_crit() {
        assert_eq!(expected_dps(10.0, 1.0, 0.0, 150.0), 10.0);
        assert_eq!(expected_dps(10.0, 2.0, 100.0, 200.0), 40.0);
        assert_eq!(expected_dps(10.0, 2.0, 250.0, 200.0), 40.0);
    }

    #[test]
    fn test_unarmed_defaults() {
        let catalog = catalog();
        let stats = Aggregator::new(&catalog).aggregate(&bare(CharacterClass::Warrior), &StatContext::new());
        assert_eq!(stats.hands.len(), 1);
        assert!(stats.hands[0].template_id.is_none());
        assert_eq!(stats.attack_speed, 1.0);
        assert_eq!(stats.crit_chance, 5.0);
        assert_eq!(stats.crit_multiplier, 150.0);
        assert_eq!(stats.dps, 0.0);
    }

    #[test]
    fn test_local_increase_only_touches_its_weapon() {
        let catalog = catalog();
        let template = catalog.get("rusty_sword").unwrap();
        let mut c = bare(CharacterClass::Warrior);
        let sword = Item::from_template("s", template, 1)
            .with_modifier(Modifier::scalar(ModifierType::LocalIncreasedPhysical, 100.0))
            .with_modifier(Modifier::range(ModifierType::LocalAddedPhysical, 1.0, 1.0));
        c.equip(sword, EquipmentSlot::MainHand).unwrap();

        let stats = Aggregator::new(&catalog).aggregate(&c, &StatContext::new());
        let expected_min = (template.min_damage + 1.0) * 2.0;
        let expected_max = (template.max_damage + 1.0) * 2.0;
        assert_eq!(stats.min_physical_damage, expected_min);
        assert_eq!(stats.max_physical_damage, expected_max);
        assert_eq!(stats.breakdown.weapon_local_physical.min, expected_min);
    }

    #[test]
    fn test_spell_weapon_follows_instance() {
        let catalog = catalog();
        let template = catalog.get("oak_staff").unwrap();
        let mut c = bare(CharacterClass::Mage);
        c.equip(Item::from_template("st", template, 1), EquipmentSlot::MainHand).unwrap();
        let aggregator = Aggregator::new(&catalog);

        let none = aggregator.aggregate(&c, &StatContext::new());
        assert_eq!(none.hands[0].damage_of(DamageType::Fire).max, template.max_damage);

        let lightning =
            aggregator.aggregate(&c, &StatContext::new().with_instance(ElementalInstance::Lightning));
        assert_eq!(
            lightning.hands[0].damage_of(DamageType::Lightning).max,
            template.max_damage
        );
        assert_eq!(lightning.hands[0].damage_of(DamageType::Fire).max, 0.0);
    }

    #[test]
    fn test_resolver_breakdown_is_exposed() {
        let catalog = catalog();
        let mut c = bare(CharacterClass::Warrior);
        c.strength = 12;
        let stats = Aggregator::new(&catalog).aggregate(&c, &StatContext::new());
        let increased = stats.breakdown.resolved.get(Stat::IncreasedPhysical).unwrap();
        assert_eq!(increased.value, 4.0);
        assert_eq!(increased.transforms.len(), 1);
    }
}
