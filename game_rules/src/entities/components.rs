//! Component definitions shared by players and enemies.

use serde::{Deserialize, Serialize};

/// Primary attributes of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub intelligence: u32,
    pub dexterity: u32,
    pub constitution: u32,
    pub wisdom: u32,
    pub charisma: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 10,
            intelligence: 10,
            dexterity: 10,
            constitution: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// Attribute selector, used by class profiles and training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Intelligence,
    Dexterity,
    Constitution,
    Wisdom,
    Charisma,
}

impl Attributes {
    /// Read a single attribute.
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Intelligence => self.intelligence,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Raise a single attribute.
    pub fn increase(&mut self, attribute: Attribute, amount: u32) {
        let slot = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// A bounded resource such as HP or energy.
///
/// `current` is always within `[0, max]`, including after deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPool")]
pub struct Pool {
    current: u32,
    max: u32,
}

/// Unchecked wire form of a [`Pool`].
#[derive(Deserialize)]
struct StoredPool {
    current: u32,
    max: u32,
}

impl From<StoredPool> for Pool {
    fn from(stored: StoredPool) -> Self {
        Pool::new(stored.current, stored.max)
    }
}

impl Pool {
    /// A full pool with the given maximum.
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// A pool with an explicit current value, clamped to `max`.
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Remove up to `amount`, returning how much was actually removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Add up to `amount` without exceeding the maximum, returning how much was added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.max - self.current);
        self.current += added;
        added
    }

    /// Refill to the maximum.
    pub fn fill(&mut self) {
        self.current = self.max;
    }

    /// Raise the maximum without touching the current value.
    pub fn raise_max(&mut self, amount: u32) {
        self.max = self.max.saturating_add(amount);
    }

    /// Percentage of the pool remaining (0-100).
    pub fn percent(&self) -> u32 {
        if self.max == 0 {
            return 0;
        }
        ((self.current as u64 * 100) / self.max as u64) as u32
    }
}
