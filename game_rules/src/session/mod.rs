//! Per-action entry points for the chat layer.
//!
//! A [`GameSession`] bundles the enemy catalog and the combat resolver. It
//! holds no player state: every call receives the player, mutates it, and the
//! caller persists it afterwards.

use tracing::{debug, warn};

use crate::entities::{Attribute, Enemy, Player};
use crate::error::{RulesError, RulesResult};
use crate::mechanics::{
    CombatAction, CombatResolver, CombatResult, Difficulty, EnemyCatalog, RandomSource,
};

/// Energy spent to go looking for a fight.
pub const ENCOUNTER_ENERGY_COST: u32 = 10;

/// Gold per player level charged for one point of training.
pub const TRAINING_COST_PER_LEVEL: u64 = 25;

pub struct GameSession<R> {
    catalog: EnemyCatalog,
    resolver: CombatResolver<R>,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(catalog: EnemyCatalog, rng: R) -> Self {
        Self {
            catalog,
            resolver: CombatResolver::new(rng),
        }
    }

    /// Session using the built-in enemy catalog.
    pub fn with_builtin_catalog(rng: R) -> Self {
        Self::new(EnemyCatalog::builtin(), rng)
    }

    pub fn catalog(&self) -> &EnemyCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &CombatResolver<R> {
        &self.resolver
    }

    /// Spend energy and start a fight against a freshly generated enemy.
    pub fn start_encounter<'p>(
        &self,
        player: &'p mut Player,
        difficulty: Difficulty,
    ) -> RulesResult<&'p Enemy> {
        if player.is_in_combat() {
            return Err(RulesError::AlreadyInCombat);
        }
        if !player.is_alive() {
            return Err(RulesError::PlayerIncapacitated);
        }
        if player.energy.current() < ENCOUNTER_ENERGY_COST {
            warn!(
                player_id = %player.id,
                energy = player.energy.current(),
                "not enough energy to explore"
            );
            return Err(RulesError::NotEnoughEnergy {
                required: ENCOUNTER_ENERGY_COST,
                available: player.energy.current(),
            });
        }

        let enemy = self
            .catalog
            .generate(self.resolver.rng(), player.level, difficulty)?;
        player.energy.deplete(ENCOUNTER_ENERGY_COST);
        player.engage(enemy)?;

        player.current_enemy().ok_or(RulesError::NotInCombat)
    }

    pub fn act(&self, player: &mut Player, action: CombatAction) -> RulesResult<CombatResult> {
        self.resolver.resolve(player, action)
    }

    pub fn attack(&self, player: &mut Player) -> RulesResult<CombatResult> {
        self.resolver.attack(player)
    }

    pub fn defend(&self, player: &mut Player) -> RulesResult<CombatResult> {
        self.resolver.defend(player)
    }

    pub fn flee(&self, player: &mut Player) -> RulesResult<CombatResult> {
        self.resolver.flee(player)
    }

    /// Restore every resource to its maximum. Not allowed mid-fight.
    pub fn rest(&self, player: &mut Player) -> RulesResult<()> {
        if player.is_in_combat() {
            return Err(RulesError::AlreadyInCombat);
        }
        player.hp.fill();
        player.energy.fill();
        player.mana.fill();
        player.stamina.fill();
        debug!(player_id = %player.id, "player rested");
        Ok(())
    }

    /// Pay gold to raise one attribute by a point. Returns the gold spent.
    pub fn train(&self, player: &mut Player, attribute: Attribute) -> RulesResult<u64> {
        if player.is_in_combat() {
            return Err(RulesError::AlreadyInCombat);
        }
        let cost = training_cost(player.level);
        if player.gold < cost {
            return Err(RulesError::NotEnoughGold {
                required: cost,
                available: player.gold,
            });
        }
        player.gold -= cost;
        player.attributes.increase(attribute, 1);
        debug!(player_id = %player.id, ?attribute, cost, "player trained");
        Ok(cost)
    }
}

/// Gold charged for one training session at `level`.
pub fn training_cost(level: u32) -> u64 {
    TRAINING_COST_PER_LEVEL * level.max(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterClass, PlayerId};
    use crate::mechanics::{EncounterOutcome, FixedRandom, SeededRandom};
    use crate::roster::{InMemoryRoster, PlayerStore};

    fn warrior() -> Player {
        Player::new(PlayerId(42), "Aria", CharacterClass::Warrior)
    }

    #[test]
    fn test_start_encounter() {
        let session = GameSession::with_builtin_catalog(FixedRandom::constant(0));
        let mut player = warrior();

        let enemy = session.start_encounter(&mut player, Difficulty::Easy).unwrap();
        assert_eq!(enemy.name, "Lobo Salvaje");

        assert!(player.is_in_combat());
        assert_eq!(player.energy.current(), player.energy.max() - ENCOUNTER_ENERGY_COST);
    }

    #[test]
    fn test_start_encounter_preconditions() {
        let session = GameSession::with_builtin_catalog(FixedRandom::constant(0));

        let mut busy = warrior();
        session.start_encounter(&mut busy, Difficulty::Easy).unwrap();
        assert_eq!(
            session.start_encounter(&mut busy, Difficulty::Easy).err(),
            Some(RulesError::AlreadyInCombat)
        );

        let mut tired = warrior();
        tired.energy.deplete(95);
        assert_eq!(
            session.start_encounter(&mut tired, Difficulty::Easy).err(),
            Some(RulesError::NotEnoughEnergy {
                required: ENCOUNTER_ENERGY_COST,
                available: 5
            })
        );
        assert!(!tired.is_in_combat());
    }

    #[test]
    fn test_rest_and_train() {
        let session = GameSession::with_builtin_catalog(FixedRandom::constant(0));
        let mut player = warrior();
        player.hp.deplete(40);
        player.energy.deplete(40);

        session.rest(&mut player).unwrap();
        assert!(player.hp.is_full());
        assert!(player.energy.is_full());

        let attack_before = player.total_attack();
        assert_eq!(session.train(&mut player, Attribute::Strength).unwrap(), 25);
        assert_eq!(player.total_attack(), attack_before + 1);
        assert_eq!(player.gold, 25);

        session.train(&mut player, Attribute::Strength).unwrap();
        assert_eq!(
            session.train(&mut player, Attribute::Strength),
            Err(RulesError::NotEnoughGold {
                required: 25,
                available: 0
            })
        );
    }

    #[test]
    fn test_no_rest_in_combat() {
        let session = GameSession::with_builtin_catalog(FixedRandom::constant(0));
        let mut player = warrior();
        session.start_encounter(&mut player, Difficulty::Easy).unwrap();

        assert_eq!(session.rest(&mut player), Err(RulesError::AlreadyInCombat));
        assert_eq!(
            session.train(&mut player, Attribute::Dexterity),
            Err(RulesError::AlreadyInCombat)
        );
    }

    #[test]
    fn test_full_session_through_roster() {
        let session = GameSession::with_builtin_catalog(SeededRandom::new(7));
        let mut roster = InMemoryRoster::new();
        roster.save(warrior());

        for _ in 0..20 {
            let mut player = roster.load(PlayerId(42)).unwrap();
            if !player.is_alive() || player.energy.current() < ENCOUNTER_ENERGY_COST {
                session.rest(&mut player).unwrap();
            }
            session.start_encounter(&mut player, Difficulty::Easy).unwrap();
            roster.save(player);

            loop {
                let mut player = roster.load(PlayerId(42)).unwrap();
                let result = session.act(&mut player, CombatAction::Attack).unwrap();
                roster.save(player);
                if result.outcome() != EncounterOutcome::Ongoing {
                    break;
                }
            }
        }

        let player = roster.load(PlayerId(42)).unwrap();
        assert!(!player.is_in_combat());
        assert!(player.hp.current() <= player.hp.max());
    }
}
