//! Character classes and their starting profiles.
//!
//! Classes are data: each row of [`CLASS_PROFILES`] holds the starting
//! attributes, resource bonuses, attack attribute and starting gear of one
//! class. Adding a class means adding a variant and a row.

use serde::{Deserialize, Serialize};

use super::{Attribute, Attributes, Item};

/// Playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
    Paladin,
    Ranger,
    Necromancer,
}

impl CharacterClass {
    /// All classes, in menu order.
    pub const ALL: [CharacterClass; 7] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Rogue,
        CharacterClass::Cleric,
        CharacterClass::Paladin,
        CharacterClass::Ranger,
        CharacterClass::Necromancer,
    ];

    /// The starting profile for this class.
    pub fn profile(self) -> &'static ClassProfile {
        // The table has exactly one row per variant, in declaration order.
        &CLASS_PROFILES[self as usize]
    }

    /// Display name.
    pub fn display_name(self) -> &'static str {
        self.profile().display_name
    }
}

/// Starting package for a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassProfile {
    pub class: CharacterClass,
    pub display_name: &'static str,
    /// Attribute whose value feeds total attack.
    pub attack_attribute: Attribute,
    pub attributes: Attributes,
    pub bonus_hp: u32,
    pub bonus_mana: u32,
    /// Name and attack bonus of the starting weapon.
    pub weapon: (&'static str, u32),
    /// Name and defense bonus of the starting armor.
    pub armor: (&'static str, u32),
}

impl ClassProfile {
    pub fn starting_weapon(&self) -> Item {
        Item::weapon(self.weapon.0, self.weapon.1)
    }

    pub fn starting_armor(&self) -> Item {
        Item::armor(self.armor.0, self.armor.1)
    }
}

const fn attrs(
    strength: u32,
    intelligence: u32,
    dexterity: u32,
    constitution: u32,
    wisdom: u32,
    charisma: u32,
) -> Attributes {
    Attributes {
        strength,
        intelligence,
        dexterity,
        constitution,
        wisdom,
        charisma,
    }
}

pub const CLASS_PROFILES: [ClassProfile; 7] = [
    ClassProfile {
        class: CharacterClass::Warrior,
        display_name: "Guerrero",
        attack_attribute: Attribute::Strength,
        attributes: attrs(14, 8, 10, 14, 10, 10),
        bonus_hp: 20,
        bonus_mana: 0,
        weapon: ("Espada de Hierro", 5),
        armor: ("Cota de Malla", 3),
    },
    ClassProfile {
        class: CharacterClass::Mage,
        display_name: "Mago",
        attack_attribute: Attribute::Intelligence,
        attributes: attrs(8, 15, 10, 8, 12, 10),
        bonus_hp: 0,
        bonus_mana: 30,
        weapon: ("Bastón Arcano", 6),
        armor: ("Túnica de Aprendiz", 1),
    },
    ClassProfile {
        class: CharacterClass::Rogue,
        display_name: "Pícaro",
        attack_attribute: Attribute::Dexterity,
        attributes: attrs(10, 10, 15, 10, 8, 12),
        bonus_hp: 5,
        bonus_mana: 0,
        weapon: ("Daga Afilada", 4),
        armor: ("Jubón de Cuero", 2),
    },
    ClassProfile {
        class: CharacterClass::Cleric,
        display_name: "Clérigo",
        attack_attribute: Attribute::Wisdom,
        attributes: attrs(10, 10, 8, 12, 15, 12),
        bonus_hp: 10,
        bonus_mana: 20,
        weapon: ("Maza Bendita", 4),
        armor: ("Vestiduras Sagradas", 2),
    },
    ClassProfile {
        class: CharacterClass::Paladin,
        display_name: "Paladín",
        attack_attribute: Attribute::Strength,
        attributes: attrs(13, 8, 8, 13, 12, 12),
        bonus_hp: 15,
        bonus_mana: 10,
        weapon: ("Martillo de Guerra", 5),
        armor: ("Armadura de Placas", 4),
    },
    ClassProfile {
        class: CharacterClass::Ranger,
        display_name: "Explorador",
        attack_attribute: Attribute::Dexterity,
        attributes: attrs(10, 10, 14, 10, 12, 10),
        bonus_hp: 5,
        bonus_mana: 0,
        weapon: ("Arco Largo", 5),
        armor: ("Capa de Explorador", 2),
    },
    ClassProfile {
        class: CharacterClass::Necromancer,
        display_name: "Nigromante",
        attack_attribute: Attribute::Intelligence,
        attributes: attrs(8, 14, 10, 10, 10, 8),
        bonus_hp: 0,
        bonus_mana: 40,
        weapon: ("Grimorio Oscuro", 6),
        armor: ("Manto Sombrío", 1),
    },
];
