//! Enemy generation from archetype tables.
//!
//! An [`EnemyCatalog`] holds one pool of [`EnemyArchetype`]s per difficulty
//! tier. Generating an enemy:
//! 1. **Select**: pick a uniform random archetype from the tier's pool
//! 2. **Level**: `max(1, player_level + tier offset)`
//! 3. **Scale**: add `(level - 1) × per-level increment` to every stat

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Difficulty, RandomSource};
use crate::entities::{Enemy, EntityId, Pool};
use crate::error::{RulesError, RulesResult};

pub const HP_PER_ENEMY_LEVEL: u32 = 10;
pub const ATTACK_PER_ENEMY_LEVEL: u32 = 2;
pub const DEFENSE_PER_ENEMY_LEVEL: u32 = 1;
pub const XP_PER_ENEMY_LEVEL: u32 = 10;
pub const GOLD_PER_ENEMY_LEVEL: u64 = 5;

/// Largest base stat a catalog may declare.
pub const MAX_ARCHETYPE_STAT: u32 = 100_000;

/// Static enemy template, before level scaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub xp_reward: u32,
    pub gold_reward: u64,
}

impl EnemyArchetype {
    pub fn new(
        name: impl Into<String>,
        emoji: impl Into<String>,
        hp: u32,
        attack: u32,
        defense: u32,
        xp_reward: u32,
        gold_reward: u64,
    ) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            hp,
            attack,
            defense,
            xp_reward,
            gold_reward,
        }
    }

    /// Instantiate this archetype at `level`.
    pub fn scale(&self, level: u32, difficulty: Difficulty) -> Enemy {
        let level = level.max(1);
        let steps = level - 1;
        Enemy {
            id: EntityId::new(),
            name: self.name.clone(),
            emoji: self.emoji.clone(),
            level,
            hp: Pool::full(scaled(self.hp, steps, HP_PER_ENEMY_LEVEL)),
            attack: scaled(self.attack, steps, ATTACK_PER_ENEMY_LEVEL),
            defense: scaled(self.defense, steps, DEFENSE_PER_ENEMY_LEVEL),
            xp_reward: scaled(self.xp_reward, steps, XP_PER_ENEMY_LEVEL),
            gold_reward: self
                .gold_reward
                .saturating_add((steps as u64).saturating_mul(GOLD_PER_ENEMY_LEVEL)),
            difficulty,
        }
    }

    /// Name and value of the first stat above [`MAX_ARCHETYPE_STAT`], if any.
    fn oversized_stat(&self) -> Option<(&'static str, u64)> {
        [
            ("hp", self.hp as u64),
            ("attack", self.attack as u64),
            ("defense", self.defense as u64),
            ("xp_reward", self.xp_reward as u64),
            ("gold_reward", self.gold_reward),
        ]
        .into_iter()
        .find(|&(_, value)| value > MAX_ARCHETYPE_STAT as u64)
    }
}

fn scaled(base: u32, steps: u32, per_level: u32) -> u32 {
    base.saturating_add(steps.saturating_mul(per_level))
}

/// Level of an enemy generated for a player of `player_level`.
pub fn enemy_level(player_level: u32, difficulty: Difficulty) -> u32 {
    (player_level as i64 + difficulty.level_offset() as i64).max(1) as u32
}

/// Read-only archetype table, one pool per difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyCatalog {
    #[serde(default)]
    pub easy: Vec<EnemyArchetype>,
    #[serde(default)]
    pub medium: Vec<EnemyArchetype>,
    #[serde(default)]
    pub hard: Vec<EnemyArchetype>,
    #[serde(default)]
    pub boss: Vec<EnemyArchetype>,
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EnemyCatalog {
    /// The catalog shipped with the game.
    pub fn builtin() -> Self {
        Self {
            easy: vec![
                EnemyArchetype::new("Lobo Salvaje", "🐺", 30, 8, 2, 20, 15),
                EnemyArchetype::new("Goblin Ladrón", "👺", 25, 7, 1, 18, 20),
                EnemyArchetype::new("Rata Gigante", "🐀", 20, 6, 1, 15, 10),
                EnemyArchetype::new("Slime Verde", "🟢", 35, 5, 3, 22, 12),
            ],
            medium: vec![
                EnemyArchetype::new("Orco Guerrero", "👹", 60, 14, 5, 45, 35),
                EnemyArchetype::new("Esqueleto Arquero", "💀", 45, 16, 3, 40, 30),
                EnemyArchetype::new("Araña Venenosa", "🕷️", 50, 13, 4, 42, 28),
            ],
            hard: vec![
                EnemyArchetype::new("Troll de las Cavernas", "🧌", 110, 22, 9, 90, 70),
                EnemyArchetype::new("Caballero Maldito", "⚔️", 95, 25, 11, 95, 80),
                EnemyArchetype::new("Hechicero Oscuro", "🧙", 80, 28, 6, 100, 85),
            ],
            boss: vec![
                EnemyArchetype::new("Dragón Ancestral", "🐉", 250, 38, 15, 300, 250),
                EnemyArchetype::new("Rey Liche", "👑", 220, 42, 13, 320, 260),
                EnemyArchetype::new("Hidra de Tres Cabezas", "🐍", 280, 35, 14, 310, 240),
            ],
        }
    }

    /// Load a catalog from TOML, rejecting any tier with an empty pool.
    ///
    /// ```toml
    /// [[easy]]
    /// name = "Lobo Salvaje"
    /// emoji = "🐺"
    /// hp = 30
    /// attack = 8
    /// defense = 2
    /// xp_reward = 20
    /// gold_reward = 15
    /// ```
    pub fn from_toml_str(source: &str) -> RulesResult<Self> {
        let catalog: EnemyCatalog = toml::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every tier can produce an enemy and no stat is out of range.
    pub fn validate(&self) -> RulesResult<()> {
        for difficulty in Difficulty::ALL {
            let pool = self.pool(difficulty);
            if pool.is_empty() {
                return Err(RulesError::InvalidCatalog(format!(
                    "tier {:?} has no archetypes",
                    difficulty
                )));
            }
            for archetype in pool {
                if let Some((stat, value)) = archetype.oversized_stat() {
                    return Err(RulesError::InvalidCatalog(format!(
                        "{} has {} = {}, limit is {}",
                        archetype.name, stat, value, MAX_ARCHETYPE_STAT
                    )));
                }
            }
        }
        Ok(())
    }

    /// Archetypes available for a tier.
    pub fn pool(&self, difficulty: Difficulty) -> &[EnemyArchetype] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Boss => &self.boss,
        }
    }

    /// Generate a scaled enemy for a player of `player_level`.
    pub fn generate(
        &self,
        rng: &dyn RandomSource,
        player_level: u32,
        difficulty: Difficulty,
    ) -> RulesResult<Enemy> {
        let pool = self.pool(difficulty);
        if pool.is_empty() {
            return Err(RulesError::EmptyArchetypePool(difficulty));
        }

        let index = rng.random_range(0, pool.len() as i32 - 1) as usize;
        let archetype = &pool[index.min(pool.len() - 1)];
        let level = enemy_level(player_level, difficulty);
        let enemy = archetype.scale(level, difficulty);

        debug!(
            enemy_id = %enemy.id,
            enemy = %enemy.name,
            level = enemy.level,
            ?difficulty,
            hp = enemy.hp.max(),
            attack = enemy.attack,
            defense = enemy.defense,
            "generated enemy"
        );
        Ok(enemy)
    }
}
