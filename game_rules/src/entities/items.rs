//! Items, equipment slots and the bounded inventory.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Default number of inventory slots.
pub const INVENTORY_CAPACITY: usize = 20;

/// Equipment slots a player can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

/// What an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon { attack: u32 },
    Armor { defense: u32 },
    Potion { heal: u32 },
}

/// An item that can sit in an inventory or an equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn weapon(name: impl Into<String>, attack: u32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Weapon { attack },
        }
    }

    pub fn armor(name: impl Into<String>, defense: u32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Armor { defense },
        }
    }

    pub fn potion(name: impl Into<String>, heal: u32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Potion { heal },
        }
    }

    /// The slot this item occupies when equipped, if any.
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self.kind {
            ItemKind::Weapon { .. } => Some(EquipmentSlot::Weapon),
            ItemKind::Armor { .. } => Some(EquipmentSlot::Armor),
            ItemKind::Potion { .. } => None,
        }
    }

    pub fn attack_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Weapon { attack } => attack,
            _ => 0,
        }
    }

    pub fn defense_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Armor { defense } => defense,
            _ => 0,
        }
    }
}

/// Items currently worn or wielded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
        }
    }

    /// Put an item into its slot, returning whatever was there before.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    /// Empty a slot.
    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Flat attack bonus from the equipped weapon, or 0 if none.
    pub fn attack_bonus(&self) -> u32 {
        self.weapon.as_ref().map_or(0, Item::attack_bonus)
    }

    /// Flat defense bonus from the equipped armor, or 0 if none.
    pub fn defense_bonus(&self) -> u32 {
        self.armor.as_ref().map_or(0, Item::defense_bonus)
    }
}

/// A bounded list of carried items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Default-sized inventory pre-filled with `items`. Grows to fit them if needed.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items: Vec<Item> = items.into_iter().collect();
        Self {
            capacity: INVENTORY_CAPACITY.max(items.len()),
            items,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Add an item, failing when every slot is taken.
    pub fn add(&mut self, item: Item) -> RulesResult<()> {
        if self.is_full() {
            return Err(RulesError::InventoryFull {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the first item with the given name (case-insensitive).
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        let index = self
            .items
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name))?;
        Some(self.items.remove(index))
    }

    /// Find an item by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}
