//! Game mechanics: dice, enemy generation, combat resolution and progression.

pub mod combat;
pub mod dice;
pub mod progression;
pub mod spawner;

pub use combat::*;
pub use dice::*;
pub use progression::{add_xp, xp_needed, LevelUpReport, MAX_LEVEL};
pub use spawner::*;

use serde::{Deserialize, Serialize};

/// Difficulty tier of an encounter.
///
/// Selects both the archetype pool and the level offset applied when scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Boss,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Boss,
    ];

    /// Levels added to the player's level to get the enemy's level.
    pub fn level_offset(&self) -> i32 {
        match self {
            Difficulty::Easy => -1,
            Difficulty::Medium => 0,
            Difficulty::Hard => 1,
            Difficulty::Boss => 2,
        }
    }
}

/// What the player chose to do this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    Defend,
    Flee,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_offsets() {
        assert_eq!(Difficulty::Easy.level_offset(), -1);
        assert_eq!(Difficulty::Medium.level_offset(), 0);
        assert_eq!(Difficulty::Hard.level_offset(), 1);
        assert_eq!(Difficulty::Boss.level_offset(), 2);
    }
}
