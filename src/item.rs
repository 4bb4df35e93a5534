//! Item module.
//!
//! Two layers live here:
//! - `ItemTemplate`: an immutable catalog entry (base numbers, level range,
//!   allowed affixes, implicit pool, optional boss-exclusive data).
//! - `Item`: a rolled instance referencing a template by id.
//!
//! `ItemCatalog` loads templates from JSON once and validates them; after
//! that it is read-only. A built-in catalog ships with the crate.

use crate::character::EquipmentSlot;
use crate::error::EngineError;
use crate::modifier::{AffixKind, Modifier, ModifierEffect, ModifierType};
use crate::numeric::StatValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Base item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Sword,
    Axe,
    Dagger,
    Mace,
    Bow,
    Staff,
    Wand,
    Shield,
    Helmet,
    BodyArmor,
    Gloves,
    Boots,
    Amulet,
    Ring,
    Belt,
}

impl ItemType {
    /// Every item type.
    pub const ALL: [ItemType; 15] = [
        ItemType::Sword,
        ItemType::Axe,
        ItemType::Dagger,
        ItemType::Mace,
        ItemType::Bow,
        ItemType::Staff,
        ItemType::Wand,
        ItemType::Shield,
        ItemType::Helmet,
        ItemType::BodyArmor,
        ItemType::Gloves,
        ItemType::Boots,
        ItemType::Amulet,
        ItemType::Ring,
        ItemType::Belt,
    ];

    /// Returns true for anything held in a weapon slot that deals damage.
    pub fn is_weapon(self) -> bool {
        matches!(
            self,
            ItemType::Sword
                | ItemType::Axe
                | ItemType::Dagger
                | ItemType::Mace
                | ItemType::Bow
                | ItemType::Staff
                | ItemType::Wand
        )
    }

    /// Returns true if this weapon occupies both hands.
    pub fn is_two_handed(self) -> bool {
        matches!(self, ItemType::Bow | ItemType::Staff)
    }

    /// Returns true for amulets, rings and belts.
    pub fn is_jewelry(self) -> bool {
        matches!(self, ItemType::Amulet | ItemType::Ring | ItemType::Belt)
    }

    /// Whether an item of this type may occupy `slot`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use riftcore::character::EquipmentSlot;
    /// use riftcore::item::ItemType;
    ///
    /// assert!(ItemType::Dagger.fits(EquipmentSlot::OffHand));
    /// assert!(!ItemType::Staff.fits(EquipmentSlot::OffHand));
    /// assert!(ItemType::Ring.fits(EquipmentSlot::RightRing));
    /// ```
    pub fn fits(self, slot: EquipmentSlot) -> bool {
        match slot {
            EquipmentSlot::MainHand => self.is_weapon(),
            EquipmentSlot::OffHand => {
                (self.is_weapon() && !self.is_two_handed()) || self == ItemType::Shield
            }
            EquipmentSlot::Helmet => self == ItemType::Helmet,
            EquipmentSlot::BodyArmor => self == ItemType::BodyArmor,
            EquipmentSlot::Gloves => self == ItemType::Gloves,
            EquipmentSlot::Boots => self == ItemType::Boots,
            EquipmentSlot::Amulet => self == ItemType::Amulet,
            EquipmentSlot::LeftRing | EquipmentSlot::RightRing => self == ItemType::Ring,
            EquipmentSlot::Belt => self == ItemType::Belt,
        }
    }
}

/// How a weapon's base damage is dealt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    /// Base damage is physical; attack speed scales it.
    #[default]
    Physical,
    /// Base damage goes to the active elemental instance; cast speed scales it.
    Spell,
}

/// Item rarity, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Legendary,
}

impl Rarity {
    /// Every rarity, lowest first.
    pub const ALL: [Rarity; 4] = [Rarity::Normal, Rarity::Magic, Rarity::Rare, Rarity::Legendary];

    /// Inclusive bounds on the explicit affix count of this rarity.
    pub fn affix_bounds(self) -> (usize, usize) {
        match self {
            Rarity::Normal => (0, 0),
            Rarity::Magic => (1, 2),
            Rarity::Rare => (3, 6),
            Rarity::Legendary => (5, 6),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Normal => "Normal",
            Rarity::Magic => "Magic",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        };
        f.write_str(name)
    }
}

/// One candidate in a template's implicit pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedImplicit {
    pub kind: ModifierType,
    pub weight: f64,
}

/// Fixed data for an item that only drops from a specific boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossExclusive {
    /// The boss this item drops from.
    pub boss_id: String,
    /// Fixed explicit modifiers, in display order.
    pub modifiers: Vec<Modifier>,
    /// Fixed implicit modifier.
    #[serde(default)]
    pub implicit: Option<Modifier>,
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub damage_kind: DamageKind,
    #[serde(default)]
    pub min_damage: StatValue,
    #[serde(default)]
    pub max_damage: StatValue,
    /// Attacks (or casts) per second. Zero for non-weapons.
    #[serde(default)]
    pub attack_speed: StatValue,
    #[serde(default)]
    pub crit_chance: StatValue,
    #[serde(default)]
    pub armor: StatValue,
    #[serde(default)]
    pub evasion: StatValue,
    #[serde(default)]
    pub barrier: StatValue,
    #[serde(default)]
    pub block_chance: StatValue,
    pub min_level: u32,
    pub max_level: u32,
    /// Affix types this base may roll.
    #[serde(default)]
    pub allowed_modifiers: Vec<ModifierType>,
    #[serde(default)]
    pub implicit_pool: Vec<WeightedImplicit>,
    #[serde(default)]
    pub boss: Option<BossExclusive>,
}

impl ItemTemplate {
    /// Returns true if base damage is attributed to the elemental instance.
    pub fn is_spell(&self) -> bool {
        self.damage_kind == DamageKind::Spell
    }

    /// Returns true if this template only drops from a boss.
    pub fn is_boss_exclusive(&self) -> bool {
        self.boss.is_some()
    }

    /// Returns true if `level` lies inside `[min_level, max_level]`.
    pub fn contains_level(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }

    /// Allowed affix types of one side, without duplicates, in catalog order.
    pub fn allowed_of(&self, side: AffixKind) -> Vec<ModifierType> {
        let mut pool: Vec<ModifierType> = Vec::new();
        for kind in &self.allowed_modifiers {
            if kind.affix() == side && !pool.contains(kind) {
                pool.push(*kind);
            }
        }
        pool
    }

    /// Validate the template's static data.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.id.is_empty() {
            return Err(EngineError::Catalog("template id must not be empty".into()));
        }
        if self.min_level > self.max_level {
            return Err(EngineError::Catalog(format!(
                "template '{}': min_level {} exceeds max_level {}",
                self.id, self.min_level, self.max_level
            )));
        }
        if self.min_damage < 0.0 || self.min_damage > self.max_damage {
            return Err(EngineError::Catalog(format!(
                "template '{}': invalid damage range {}-{}",
                self.id, self.min_damage, self.max_damage
            )));
        }
        if self.item_type.is_weapon() && self.attack_speed <= 0.0 {
            return Err(EngineError::Catalog(format!(
                "template '{}': weapons need a positive attack speed",
                self.id
            )));
        }
        for kind in &self.allowed_modifiers {
            if !self.accepts_local(*kind) {
                return Err(EngineError::Catalog(format!(
                    "template '{}': {:?} cannot roll on {:?}",
                    self.id, kind, self.item_type
                )));
            }
        }
        for candidate in &self.implicit_pool {
            if candidate.weight <= 0.0 || !candidate.weight.is_finite() {
                return Err(EngineError::Catalog(format!(
                    "template '{}': implicit {:?} has non-positive weight",
                    self.id, candidate.kind
                )));
            }
        }
        Ok(())
    }

    fn accepts_local(&self, kind: ModifierType) -> bool {
        match kind.effect() {
            ModifierEffect::LocalDamage(_)
            | ModifierEffect::LocalIncreasedPhysical
            | ModifierEffect::LocalAttackSpeed
            | ModifierEffect::LocalCritChance => self.item_type.is_weapon(),
            ModifierEffect::LocalIncreasedDefence(_) => {
                !self.item_type.is_weapon() && !self.item_type.is_jewelry()
            }
            ModifierEffect::Global(_) | ModifierEffect::GlobalRange(..) => true,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    templates: Vec<ItemTemplate>,
}

/// The read-only set of item templates, indexed by id.
///
/// # Examples
///
/// ```rust
/// use riftcore::item::ItemCatalog;
///
/// let catalog = ItemCatalog::from_json(r#"{
///     "templates": [{
///         "id": "rusty_sword",
///         "name": "Rusty Sword",
///         "item_type": "sword",
///         "min_damage": 4, "max_damage": 9,
///         "attack_speed": 1.3, "crit_chance": 5,
///         "min_level": 1, "max_level": 30
///     }]
/// }"#).unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.get("rusty_sword").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    templates: Vec<ItemTemplate>,
    index: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Build a catalog from templates, validating each one.
    pub fn from_templates(templates: Vec<ItemTemplate>) -> Result<Self, EngineError> {
        let mut index = HashMap::with_capacity(templates.len());
        for (i, template) in templates.iter().enumerate() {
            template.validate()?;
            if index.insert(template.id.clone(), i).is_some() {
                return Err(EngineError::Catalog(format!(
                    "duplicate template id '{}'",
                    template.id
                )));
            }
        }
        debug!(templates = templates.len(), "item catalog loaded");
        Ok(Self { templates, index })
    }

    /// Parse and validate a catalog from JSON of the form
    /// `{ "templates": [ ... ] }`.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_templates(file.templates)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&ItemTemplate> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    /// All templates, in load order.
    pub fn templates(&self) -> impl Iterator<Item = &ItemTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// A rolled item instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Id of the `ItemTemplate` this item was rolled from.
    pub base_id: String,
    /// Display name, e.g. "Rare Iron Axe".
    pub name: String,
    pub item_type: ItemType,
    pub rarity: Rarity,
    /// Fixed at roll time to the level of the monster that dropped it.
    pub level_requirement: u32,
    /// Explicit affixes, prefixes first.
    pub modifiers: Vec<Modifier>,
    pub implicit: Option<Modifier>,
}

impl Item {
    /// A plain Normal instance of a template, with no modifiers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use riftcore::item::{Item, ItemCatalog, Rarity};
    /// use riftcore::modifier::{Modifier, ModifierType};
    ///
    /// let catalog = ItemCatalog::builtin().unwrap();
    /// let template = catalog.get("iron_ring").unwrap();
    /// let ring = Item::from_template("ring-1", template, 12)
    ///     .with_modifier(Modifier::scalar(ModifierType::Strength, 8.0));
    ///
    /// assert_eq!(ring.name, "Iron Ring");
    /// assert_eq!(ring.rarity, Rarity::Normal);
    /// assert_eq!(ring.level_requirement, 12);
    /// assert_eq!(ring.modifiers.len(), 1);
    /// ```
    pub fn from_template(id: impl Into<String>, template: &ItemTemplate, level: u32) -> Self {
        Self {
            id: id.into(),
            base_id: template.id.clone(),
            name: template.name.clone(),
            item_type: template.item_type,
            rarity: Rarity::Normal,
            level_requirement: level,
            modifiers: Vec::new(),
            implicit: None,
        }
    }

    /// Append an explicit modifier.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Set the implicit modifier.
    pub fn with_implicit(mut self, modifier: Modifier) -> Self {
        self.implicit = Some(modifier);
        self
    }

    /// Set the rarity.
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Implicit first, then explicit modifiers, each tagged with whether it
    /// is the implicit.
    pub fn all_modifiers(&self) -> impl Iterator<Item = (&Modifier, bool)> {
        self.implicit
            .iter()
            .map(|m| (m, true))
            .chain(self.modifiers.iter().map(|m| (m, false)))
    }

    /// Number of explicit affixes on one side.
    pub fn affix_count(&self, side: AffixKind) -> usize {
        self.modifiers
            .iter()
            .filter(|m| m.kind.affix() == side)
            .count()
    }
}
