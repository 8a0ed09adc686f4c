//! Enemy definitions.

use serde::{Deserialize, Serialize};

use super::{EntityId, Pool};
use crate::mechanics::Difficulty;

/// A generated opponent. Lives only as long as the encounter it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub name: String,
    pub emoji: String,
    pub level: u32,
    pub hp: Pool,
    pub attack: u32,
    pub defense: u32,
    pub xp_reward: u32,
    pub gold_reward: u64,
    pub difficulty: Difficulty,
}

impl Enemy {
    /// Whether the enemy has run out of hit points.
    pub fn is_defeated(&self) -> bool {
        self.hp.is_empty()
    }

    /// Name prefixed with its display glyph.
    pub fn label(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> Enemy {
        Enemy {
            id: EntityId::nil(),
            name: "Lobo Salvaje".to_string(),
            emoji: "🐺".to_string(),
            level: 1,
            hp: Pool::full(30),
            attack: 8,
            defense: 2,
            xp_reward: 20,
            gold_reward: 15,
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_enemy_defeat() {
        let mut enemy = wolf();
        assert!(!enemy.is_defeated());

        enemy.hp.deplete(30);
        assert!(enemy.is_defeated());
    }

    #[test]
    fn test_enemy_label() {
        let mut enemy = wolf();
        assert_eq!(enemy.label(), "🐺 Lobo Salvaje");

        enemy.emoji.clear();
        assert_eq!(enemy.label(), "Lobo Salvaje");
    }
}
