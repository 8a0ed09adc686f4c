//! Narrator - renders combat events as chat-ready lines.

use game_rules::{CombatResult, Player};
use tracing::trace;

use crate::events::CombatEvent;

/// What the narrator includes besides the prose.
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    /// Append the d20 value to each line that involved a roll.
    pub show_rolls: bool,

    /// Close ongoing turns with a line of remaining hit points.
    pub show_hp: bool,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            show_rolls: false,
            show_hp: true,
        }
    }
}

/// Names of the two sides of an encounter.
///
/// Capture this before resolving the action: the enemy is discarded once the
/// encounter ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    pub player_name: String,
    pub enemy_name: String,
}

impl TurnContext {
    pub fn new(player_name: impl Into<String>, enemy_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            enemy_name: enemy_name.into(),
        }
    }

    /// Context for the player's running encounter, if any.
    pub fn for_encounter(player: &Player) -> Option<Self> {
        player
            .current_enemy()
            .map(|enemy| Self::new(player.name.clone(), enemy.label()))
    }
}

pub struct Narrator {
    config: NarratorConfig,
}

impl Narrator {
    pub fn new(config: NarratorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(NarratorConfig::default())
    }

    /// One line per event, plus an HP line for ongoing turns.
    pub fn narrate(&self, result: &CombatResult, ctx: &TurnContext) -> Vec<String> {
        let events = CombatEvent::from_result(result);
        let mut lines: Vec<String> = events
            .iter()
            .map(|event| self.describe(event, ctx))
            .collect();

        if self.config.show_hp && !result.outcome().is_terminal() {
            lines.push(format!(
                "❤️ {}: {} HP | {}: {} HP",
                ctx.player_name, result.player_hp, ctx.enemy_name, result.enemy_hp
            ));
        }

        trace!(events = events.len(), lines = lines.len(), "narrated combat turn");
        lines
    }

    /// The whole turn as a single message.
    pub fn to_message(&self, result: &CombatResult, ctx: &TurnContext) -> String {
        self.narrate(result, ctx).join("\n")
    }

    /// Render a single event.
    pub fn describe(&self, event: &CombatEvent, ctx: &TurnContext) -> String {
        let p = &ctx.player_name;
        let e = &ctx.enemy_name;

        match *event {
            CombatEvent::PlayerStruck {
                roll,
                damage,
                critical: true,
            } => self.with_roll(
                format!("💥 ¡Golpe crítico! {} causa {} de daño a {}.", p, damage, e),
                Some(roll),
            ),
            CombatEvent::PlayerStruck { roll, damage, .. } => self.with_roll(
                format!("⚔️ {} ataca a {} y causa {} de daño.", p, e, damage),
                Some(roll),
            ),
            CombatEvent::PlayerMissed { roll } => {
                self.with_roll(format!("💨 {} falla su ataque contra {}.", p, e), Some(roll))
            }
            CombatEvent::Braced => format!("🛡️ {} adopta una postura defensiva.", p),
            CombatEvent::EnemyStruck {
                roll,
                damage,
                critical: true,
            } => self.with_roll(
                format!("💥 ¡{} asesta un golpe crítico! {} recibe {} de daño.", e, p, damage),
                roll,
            ),
            CombatEvent::EnemyStruck { roll, damage, .. } => self.with_roll(
                format!("🩸 {} golpea a {} y causa {} de daño.", e, p, damage),
                roll,
            ),
            CombatEvent::EnemyMissed { roll } => self.with_roll(
                format!("🌀 {} ataca, pero {} esquiva el golpe.", e, p),
                Some(roll),
            ),
            CombatEvent::Escaped { roll } => {
                self.with_roll(format!("🏃 {} logra escapar de {}.", p, e), Some(roll))
            }
            CombatEvent::EscapeFailed { roll } => self.with_roll(
                format!("🚫 {} intenta huir, pero {} le corta el paso.", p, e),
                Some(roll),
            ),
            CombatEvent::EnemyDefeated => format!("🏆 ¡{} ha sido derrotado!", e),
            CombatEvent::PlayerDefeated => format!("☠️ {} ha caído en combate.", p),
            CombatEvent::RewardsGranted { xp, gold } => {
                format!("✨ +{} XP | 💰 +{} oro", xp, gold)
            }
            CombatEvent::LeveledUp { levels: 1 } => format!("🎉 ¡{} sube de nivel!", p),
            CombatEvent::LeveledUp { levels } => format!("🎉 ¡{} sube {} niveles!", p, levels),
        }
    }

    fn with_roll(&self, line: String, roll: Option<u32>) -> String {
        match roll {
            Some(roll) if self.config.show_rolls => format!("{} (🎲 {})", line, roll),
            _ => line,
        }
    }
}
