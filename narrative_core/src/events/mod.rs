//! Combat events - the ordered story of one resolved action.

use game_rules::{CombatAction, CombatResult};
use serde::{Deserialize, Serialize};

/// Something that happened during a turn, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    PlayerStruck {
        roll: u32,
        damage: u32,
        critical: bool,
    },
    PlayerMissed {
        roll: u32,
    },
    Braced,
    /// `roll` is `None` for the free hit after a failed escape.
    EnemyStruck {
        roll: Option<u32>,
        damage: u32,
        critical: bool,
    },
    EnemyMissed {
        roll: u32,
    },
    Escaped {
        roll: u32,
    },
    EscapeFailed {
        roll: u32,
    },
    EnemyDefeated,
    PlayerDefeated,
    RewardsGranted {
        xp: u32,
        gold: u64,
    },
    LeveledUp {
        levels: u32,
    },
}

impl CombatEvent {
    /// Extract the events of a resolved action.
    pub fn from_result(result: &CombatResult) -> Vec<CombatEvent> {
        let mut events = Vec::new();

        match result.action {
            CombatAction::Attack => {
                if let Some(roll) = result.player_roll {
                    if result.player_hit {
                        events.push(CombatEvent::PlayerStruck {
                            roll,
                            damage: result.player_damage,
                            critical: result.player_critical,
                        });
                    } else {
                        events.push(CombatEvent::PlayerMissed { roll });
                    }
                }
            }
            CombatAction::Defend => events.push(CombatEvent::Braced),
            CombatAction::Flee => {
                if let Some(roll) = result.player_roll {
                    if result.fled {
                        events.push(CombatEvent::Escaped { roll });
                    } else {
                        events.push(CombatEvent::EscapeFailed { roll });
                    }
                }
            }
        }

        if result.enemy_defeated {
            events.push(CombatEvent::EnemyDefeated);
            events.push(CombatEvent::RewardsGranted {
                xp: result.xp_awarded,
                gold: result.gold_awarded,
            });
            if result.levels_gained > 0 {
                events.push(CombatEvent::LeveledUp {
                    levels: result.levels_gained,
                });
            }
            return events;
        }

        if result.enemy_hit {
            events.push(CombatEvent::EnemyStruck {
                roll: result.enemy_roll,
                damage: result.enemy_damage,
                critical: result.enemy_critical,
            });
        } else if let Some(roll) = result.enemy_roll {
            events.push(CombatEvent::EnemyMissed { roll });
        }

        if result.player_defeated {
            events.push(CombatEvent::PlayerDefeated);
        }

        events
    }

    /// Whether this event ends the encounter.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CombatEvent::EnemyDefeated | CombatEvent::PlayerDefeated | CombatEvent::Escaped { .. }
        )
    }
}
