//! Turn resolution for player-versus-enemy encounters.
//!
//! Each call resolves exactly one player action against the enemy stored on
//! the player, commits HP changes to both sides and returns a [`CombatResult`].
//! The encounter stays [`EncounterOutcome::Ongoing`] until a call produces a
//! victory, a defeat or a successful escape, at which point the enemy is
//! discarded.
//!
//! # Formulas
//!
//! - Hit: `d20 >= 10 + target defense`
//! - Damage sample: uniform in `[80%, 120%)` of the attacker's attack
//! - Natural 20 on a hit: damage ×1.5, rounded up
//! - Player → enemy: `max(1, damage - enemy.defense / 2)`
//! - Enemy → player: `max(1, damage - player.total_defense)`
//! - Defending: `max(1, (damage - defense - dex / 2) / 2)`, hit threshold raised by `dex / 2`
//! - Flee: `d20 + dex >= 10 + 2 × (enemy level - player level)`

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::dice::{roll_d20, RandomSource, D20};
use super::progression::add_xp;
use super::CombatAction;
use crate::entities::{Enemy, Player};
use crate::error::{RulesError, RulesResult};

/// Base value every hit threshold and flee difficulty starts from.
pub const BASE_DIFFICULTY: u32 = 10;

/// State of an encounter after a resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    Ongoing,
    Victory,
    Defeat,
    Fled,
}

impl EncounterOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EncounterOutcome::Ongoing)
    }
}

/// Everything that happened during one resolved action.
///
/// Holds only copies of scalar outcomes, never references to the combatants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub action: CombatAction,

    /// The player's d20 (attack or flee roll). `None` when defending.
    pub player_roll: Option<u32>,
    pub player_hit: bool,
    pub player_critical: bool,
    pub player_damage: u32,

    /// The enemy's d20. `None` when it did not roll.
    pub enemy_roll: Option<u32>,
    pub enemy_hit: bool,
    pub enemy_critical: bool,
    pub enemy_damage: u32,

    pub enemy_defeated: bool,
    pub player_defeated: bool,
    pub player_defended: bool,
    pub fled: bool,

    pub xp_awarded: u32,
    pub gold_awarded: u64,
    pub levels_gained: u32,

    /// Hit points left after the action.
    pub player_hp: u32,
    pub enemy_hp: u32,
}

impl CombatResult {
    fn new(action: CombatAction) -> Self {
        Self {
            action,
            player_roll: None,
            player_hit: false,
            player_critical: false,
            player_damage: 0,
            enemy_roll: None,
            enemy_hit: false,
            enemy_critical: false,
            enemy_damage: 0,
            enemy_defeated: false,
            player_defeated: false,
            player_defended: action == CombatAction::Defend,
            fled: false,
            xp_awarded: 0,
            gold_awarded: 0,
            levels_gained: 0,
            player_hp: 0,
            enemy_hp: 0,
        }
    }

    pub fn outcome(&self) -> EncounterOutcome {
        if self.enemy_defeated {
            EncounterOutcome::Victory
        } else if self.player_defeated {
            EncounterOutcome::Defeat
        } else if self.fled {
            EncounterOutcome::Fled
        } else {
            EncounterOutcome::Ongoing
        }
    }
}

/// Roll needed on the d20 to hit a target with `defense`.
pub fn hit_threshold(defense: u32) -> u32 {
    BASE_DIFFICULTY.saturating_add(defense)
}

/// `[low, high)` bounds of a damage sample around `base`.
pub fn damage_range(base: u32) -> (u32, u32) {
    let base = base as u64;
    (saturate(base * 8 / 10), saturate(base * 12 / 10))
}

/// Apply the critical multiplier (×1.5, rounded up).
pub fn critical_damage(damage: u32) -> u32 {
    saturate((damage as u64 * 3).div_ceil(2))
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Target a flee roll plus dexterity must reach.
pub fn flee_difficulty(player_level: u32, enemy_level: u32) -> i64 {
    BASE_DIFFICULTY as i64 + (enemy_level as i64 - player_level as i64) * 2
}

fn sample_damage(rng: &dyn RandomSource, base: u32) -> u32 {
    let (low, high) = damage_range(base);
    if high <= low {
        return low;
    }
    // The random source works in i32, so samples top out at i32::MAX.
    let low = i32::try_from(low).unwrap_or(i32::MAX);
    let high = i32::try_from(high - 1).unwrap_or(i32::MAX);
    rng.random_range(low, high).max(0) as u32
}

/// Resolves combat actions using an injected random source.
#[derive(Debug)]
pub struct CombatResolver<R> {
    rng: R,
}

impl<R: RandomSource> CombatResolver<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Resolve whichever action the player chose.
    pub fn resolve(&self, player: &mut Player, action: CombatAction) -> RulesResult<CombatResult> {
        match action {
            CombatAction::Attack => self.attack(player),
            CombatAction::Defend => self.defend(player),
            CombatAction::Flee => self.flee(player),
        }
    }

    /// Strike the enemy; if it survives, it counterattacks.
    pub fn attack(&self, player: &mut Player) -> RulesResult<CombatResult> {
        let mut enemy = self.begin_turn(player, CombatAction::Attack)?;
        let mut result = CombatResult::new(CombatAction::Attack);

        let roll = roll_d20(&self.rng);
        result.player_roll = Some(roll);

        if roll >= hit_threshold(enemy.defense) {
            let mut damage = sample_damage(&self.rng, player.total_attack());
            if roll == D20 {
                result.player_critical = true;
                damage = critical_damage(damage);
            }
            let dealt = damage.saturating_sub(enemy.defense / 2).max(1);
            enemy.hp.deplete(dealt);
            result.player_hit = true;
            result.player_damage = dealt;
        }

        if enemy.is_defeated() {
            // The enemy gets no counterattack on the turn it dies.
            result.enemy_defeated = true;
            result.xp_awarded = enemy.xp_reward;
            result.gold_awarded = enemy.gold_reward;
            player.gold = player.gold.saturating_add(enemy.gold_reward);
            result.levels_gained = add_xp(player, enemy.xp_reward).levels_gained;
            return Ok(self.end_turn(player, enemy, result));
        }

        self.counterattack(player, &enemy, &mut result);
        Ok(self.end_turn(player, enemy, result))
    }

    /// Skip the attack and brace: the enemy's hit threshold and the damage
    /// mitigation both gain `dexterity / 2`, and a hit deals half damage.
    pub fn defend(&self, player: &mut Player) -> RulesResult<CombatResult> {
        let enemy = self.begin_turn(player, CombatAction::Defend)?;
        let mut result = CombatResult::new(CombatAction::Defend);

        let boost = player.attributes.dexterity / 2;
        let defense = player.total_defense().saturating_add(boost);

        let roll = roll_d20(&self.rng);
        result.enemy_roll = Some(roll);

        if roll >= hit_threshold(defense) {
            let raw = sample_damage(&self.rng, enemy.attack) as i64;
            let dealt = saturate(((raw - defense as i64) / 2).max(1) as u64);
            player.hp.deplete(dealt);
            result.enemy_hit = true;
            result.enemy_damage = dealt;
        }

        self.check_defeat(player, &mut result);
        Ok(self.end_turn(player, enemy, result))
    }

    /// Try to escape. A failed attempt gives the enemy a free, unrolled hit.
    pub fn flee(&self, player: &mut Player) -> RulesResult<CombatResult> {
        let enemy = self.begin_turn(player, CombatAction::Flee)?;
        let mut result = CombatResult::new(CombatAction::Flee);

        let roll = roll_d20(&self.rng);
        result.player_roll = Some(roll);

        let total = roll as i64 + player.attributes.dexterity as i64;
        if total >= flee_difficulty(player.level, enemy.level) {
            result.fled = true;
            return Ok(self.end_turn(player, enemy, result));
        }

        let dealt = enemy.attack.saturating_sub(player.total_defense()).max(1);
        player.hp.deplete(dealt);
        result.enemy_hit = true;
        result.enemy_damage = dealt;

        self.check_defeat(player, &mut result);
        Ok(self.end_turn(player, enemy, result))
    }

    fn counterattack(&self, player: &mut Player, enemy: &Enemy, result: &mut CombatResult) {
        let defense = player.total_defense();
        let roll = roll_d20(&self.rng);
        result.enemy_roll = Some(roll);

        if roll >= hit_threshold(defense) {
            let mut damage = sample_damage(&self.rng, enemy.attack);
            if roll == D20 {
                result.enemy_critical = true;
                damage = critical_damage(damage);
            }
            let dealt = damage.saturating_sub(defense).max(1);
            player.hp.deplete(dealt);
            result.enemy_hit = true;
            result.enemy_damage = dealt;
        }

        self.check_defeat(player, result);
    }

    fn check_defeat(&self, player: &Player, result: &mut CombatResult) {
        if !player.is_alive() {
            result.player_defeated = true;
        }
    }

    /// Validate preconditions and take the enemy out of the player for the turn.
    fn begin_turn(&self, player: &mut Player, action: CombatAction) -> RulesResult<Enemy> {
        if !player.is_alive() {
            warn!(player_id = %player.id, ?action, "action rejected: player has no hit points");
            return Err(RulesError::PlayerIncapacitated);
        }
        player.disengage().ok_or_else(|| {
            warn!(player_id = %player.id, ?action, "action rejected: not in combat");
            RulesError::NotInCombat
        })
    }

    /// Record remaining HP and either put the enemy back or end the encounter.
    fn end_turn(
        &self,
        player: &mut Player,
        enemy: Enemy,
        mut result: CombatResult,
    ) -> CombatResult {
        result.player_hp = player.hp.current();
        result.enemy_hp = enemy.hp.current();

        let outcome = result.outcome();
        debug!(
            player_id = %player.id,
            action = ?result.action,
            player_roll = ?result.player_roll,
            player_damage = result.player_damage,
            enemy_roll = ?result.enemy_roll,
            enemy_damage = result.enemy_damage,
            ?outcome,
            "resolved combat action"
        );

        if outcome.is_terminal() {
            info!(
                player_id = %player.id,
                enemy_id = %enemy.id,
                enemy = %enemy.name,
                ?outcome,
                xp = result.xp_awarded,
                gold = result.gold_awarded,
                "encounter ended"
            );
        } else {
            player.resume(enemy);
        }
        result
    }
}
