//! Character module.
//!
//! The character sheet the host owns: identity, level, base attributes,
//! resource pools, equipment and inventory. The engine only ever borrows
//! it; mutation happens through `equip`, `unequip`, `level_up` and
//! `CharacterUpdate::apply_to`.

use crate::error::EngineError;
use crate::item::Item;
use crate::numeric::StatValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Ranger,
    Mage,
}

/// Starting values for a freshly created character of a class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassBaseStats {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub max_health: StatValue,
    pub max_mana: StatValue,
    pub armor: StatValue,
    pub evasion: StatValue,
}

impl CharacterClass {
    /// Base-stat table used by [`Character::new`].
    pub fn base_stats(self) -> ClassBaseStats {
        match self {
            CharacterClass::Warrior => ClassBaseStats {
                strength: 15,
                dexterity: 8,
                intelligence: 5,
                max_health: 120.0,
                max_mana: 0.0,
                armor: 10.0,
                evasion: 0.0,
            },
            CharacterClass::Ranger => ClassBaseStats {
                strength: 8,
                dexterity: 15,
                intelligence: 7,
                max_health: 100.0,
                max_mana: 0.0,
                armor: 0.0,
                evasion: 10.0,
            },
            CharacterClass::Mage => ClassBaseStats {
                strength: 5,
                dexterity: 7,
                intelligence: 15,
                max_health: 80.0,
                max_mana: 100.0,
                armor: 0.0,
                evasion: 0.0,
            },
        }
    }

    /// Only the Mage carries a mana pool.
    pub fn uses_mana(self) -> bool {
        matches!(self, CharacterClass::Mage)
    }
}

/// A slot in the fixed-size equipment map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Helmet,
    BodyArmor,
    Gloves,
    Boots,
    Amulet,
    LeftRing,
    RightRing,
    Belt,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 10] = [
        EquipmentSlot::MainHand,
        EquipmentSlot::OffHand,
        EquipmentSlot::Helmet,
        EquipmentSlot::BodyArmor,
        EquipmentSlot::Gloves,
        EquipmentSlot::Boots,
        EquipmentSlot::Amulet,
        EquipmentSlot::LeftRing,
        EquipmentSlot::RightRing,
        EquipmentSlot::Belt,
    ];

    fn index(self) -> usize {
        match self {
            EquipmentSlot::MainHand => 0,
            EquipmentSlot::OffHand => 1,
            EquipmentSlot::Helmet => 2,
            EquipmentSlot::BodyArmor => 3,
            EquipmentSlot::Gloves => 4,
            EquipmentSlot::Boots => 5,
            EquipmentSlot::Amulet => 6,
            EquipmentSlot::LeftRing => 7,
            EquipmentSlot::RightRing => 8,
            EquipmentSlot::Belt => 9,
        }
    }

    /// Returns true for the two hand slots.
    pub fn is_hand(self) -> bool {
        matches!(self, EquipmentSlot::MainHand | EquipmentSlot::OffHand)
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Equipped items, one optional item per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    slots: [Option<Item>; 10],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The item in `slot`, if any.
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots[slot.index()].as_ref()
    }

    /// Put `item` into `slot`, returning what was there. No validation.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Option<Item>) -> Option<Item> {
        std::mem::replace(&mut self.slots[slot.index()], item)
    }

    /// Empty `slot`, returning its item.
    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slots[slot.index()].take()
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// The character sheet.
///
/// # Examples
///
/// ```rust
/// use riftcore::character::{Character, CharacterClass};
///
/// let mut hero = Character::new("c1", "Aldren", CharacterClass::Warrior);
/// assert_eq!(hero.level, 1);
/// assert_eq!(hero.current_health, hero.base_max_health);
///
/// hero.level_up();
/// assert_eq!(hero.level, 2);
/// assert_eq!(hero.strength, 17);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub base_max_health: StatValue,
    /// Only meaningful for classes that use mana.
    pub base_max_mana: StatValue,
    pub current_health: StatValue,
    pub current_mana: StatValue,
    pub current_barrier: StatValue,
    pub base_armor: StatValue,
    pub base_evasion: StatValue,
    pub area_id: String,
    pub equipment: Equipment,
    pub inventory: Vec<Item>,
}

impl Character {
    /// Create a level-1 character from its class's base-stat table.
    pub fn new(id: impl Into<String>, name: impl Into<String>, class: CharacterClass) -> Self {
        let base = class.base_stats();
        Self {
            id: id.into(),
            name: name.into(),
            class,
            level: 1,
            experience: 0,
            strength: base.strength,
            dexterity: base.dexterity,
            intelligence: base.intelligence,
            base_max_health: base.max_health,
            base_max_mana: base.max_mana,
            current_health: base.max_health,
            current_mana: base.max_mana,
            current_barrier: 0.0,
            base_armor: base.armor,
            base_evasion: base.evasion,
            area_id: String::from("hub"),
            equipment: Equipment::new(),
            inventory: Vec::new(),
        }
    }

    /// Equip `item` into `slot`, returning the item previously there.
    ///
    /// A two-handed main-hand weapon sends any off-hand item to the
    /// inventory; equipping an off-hand item next to a two-handed weapon
    /// sends the weapon to the inventory.
    pub fn equip(&mut self, item: Item, slot: EquipmentSlot) -> Result<Option<Item>, EngineError> {
        if !item.item_type.fits(slot) {
            return Err(EngineError::SlotMismatch {
                item: item.name,
                slot,
            });
        }

        match slot {
            EquipmentSlot::MainHand if item.item_type.is_two_handed() => {
                if let Some(off) = self.equipment.take(EquipmentSlot::OffHand) {
                    debug!(item = %off.name, "two-handed weapon displaced off-hand item");
                    self.inventory.push(off);
                }
            }
            EquipmentSlot::OffHand => {
                let two_handed = self
                    .equipment
                    .get(EquipmentSlot::MainHand)
                    .map_or(false, |main| main.item_type.is_two_handed());
                if two_handed {
                    if let Some(main) = self.equipment.take(EquipmentSlot::MainHand) {
                        debug!(item = %main.name, "off-hand item displaced two-handed weapon");
                        self.inventory.push(main);
                    }
                }
            }
            _ => {}
        }

        Ok(self.equipment.replace(slot, Some(item)))
    }

    /// Move the item in `slot` to the inventory.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(), EngineError> {
        let item = self
            .equipment
            .take(slot)
            .ok_or(EngineError::EmptySlot(slot))?;
        self.inventory.push(item);
        Ok(())
    }

    /// Gain a level: +2 to each attribute, +10 base max health, and +5
    /// base max mana for mana users.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.strength += 2;
        self.dexterity += 2;
        self.intelligence += 2;
        self.base_max_health += 10.0;
        if self.class.uses_mana() {
            self.base_max_mana += 5.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemType, Rarity};

    fn item(id: &str, item_type: ItemType) -> Item {
        Item {
            id: id.to_string(),
            base_id: id.to_string(),
            name: id.to_string(),
            item_type,
            rarity: Rarity::Normal,
            level_requirement: 1,
            modifiers: Vec::new(),
            implicit: None,
        }
    }

    #[test]
    fn test_new_uses_class_table() {
        let mage = Character::new("m", "Mira", CharacterClass::Mage);
        assert_eq!(mage.intelligence, 15);
        assert_eq!(mage.current_mana, 100.0);
        let warrior = Character::new("w", "Brann", CharacterClass::Warrior);
        assert_eq!(warrior.base_max_mana, 0.0);
        assert!(!warrior.class.uses_mana());
    }

    #[test]
    fn test_equip_returns_previous() {
        let mut c = Character::new("c", "C", CharacterClass::Warrior);
        assert_eq!(c.equip(item("a", ItemType::Helmet), EquipmentSlot::Helmet).unwrap(), None);
        let prev = c.equip(item("b", ItemType::Helmet), EquipmentSlot::Helmet).unwrap();
        assert_eq!(prev.map(|i| i.id), Some("a".to_string()));
    }

    #[test]
    fn test_equip_wrong_slot() {
        let mut c = Character::new("c", "C", CharacterClass::Warrior);
        let err = c.equip(item("boots", ItemType::Boots), EquipmentSlot::Helmet);
        assert!(matches!(err, Err(EngineError::SlotMismatch { .. })));
        assert!(c.equipment.is_empty());
    }

    #[test]
    fn test_two_handed_displaces_off_hand() {
        let mut c = Character::new("c", "C", CharacterClass::Ranger);
        c.equip(item("shield", ItemType::Shield), EquipmentSlot::OffHand).unwrap();
        c.equip(item("bow", ItemType::Bow), EquipmentSlot::MainHand).unwrap();
        assert!(c.equipment.get(EquipmentSlot::OffHand).is_none());
        assert_eq!(c.inventory.len(), 1);

        c.equip(item("dagger", ItemType::Dagger), EquipmentSlot::OffHand).unwrap();
        assert!(c.equipment.get(EquipmentSlot::MainHand).is_none());
        assert_eq!(c.inventory.len(), 2);
    }

    #[test]
    fn test_unequip() {
        let mut c = Character::new("c", "C", CharacterClass::Warrior);
        assert_eq!(
            c.unequip(EquipmentSlot::Belt),
            Err(EngineError::EmptySlot(EquipmentSlot::Belt))
        );
        c.equip(item("belt", ItemType::Belt), EquipmentSlot::Belt).unwrap();
        c.unequip(EquipmentSlot::Belt).unwrap();
        assert_eq!(c.inventory.len(), 1);
    }

    #[test]
    fn test_mage_level_up_grows_mana() {
        let mut c = Character::new("m", "M", CharacterClass::Mage);
        c.level_up();
        assert_eq!(c.base_max_mana, 105.0);
        assert_eq!(c.base_max_health, 90.0);
    }
}
