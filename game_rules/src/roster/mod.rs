//! Player roster - the state-store contract and an in-memory implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::{Player, PlayerId};
use crate::error::RulesResult;

/// Where players live between actions.
pub trait PlayerStore {
    /// Load a player, or `None` if no character exists for `id`.
    fn load(&self, id: PlayerId) -> Option<Player>;

    /// Insert or replace the player keyed by its id.
    fn save(&mut self, player: Player);

    /// Delete a player, returning it if it existed.
    fn remove(&mut self, id: PlayerId) -> Option<Player>;
}

/// Process-local roster keyed by player id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    players: HashMap<PlayerId, Player>,
}

/// Serialized form of a roster.
#[derive(Debug, Serialize, Deserialize)]
struct RosterSnapshot {
    players: Vec<Player>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Borrow a player without cloning.
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Borrow a player mutably for an in-place action.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Players currently in an encounter.
    pub fn in_combat(&self) -> impl Iterator<Item = &Player> {
        self.players.values().filter(|p| p.is_in_combat())
    }

    /// Players ordered by level, then experience, highest first.
    pub fn leaderboard(&self, limit: usize) -> Vec<&Player> {
        let mut players: Vec<_> = self.players.values().collect();
        players.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then(b.xp.cmp(&a.xp))
                .then(a.id.cmp(&b.id))
        });
        players.truncate(limit);
        players
    }

    /// Serialize every player, ordered by id.
    pub fn to_json(&self) -> RulesResult<String> {
        let mut players: Vec<_> = self.players.values().cloned().collect();
        players.sort_by_key(|p| p.id);
        Ok(serde_json::to_string_pretty(&RosterSnapshot { players })?)
    }

    /// Rebuild a roster from [`InMemoryRoster::to_json`] output.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let snapshot: RosterSnapshot = serde_json::from_str(json)?;
        Ok(Self {
            players: snapshot.players.into_iter().map(|p| (p.id, p)).collect(),
        })
    }
}

impl PlayerStore for InMemoryRoster {
    fn load(&self, id: PlayerId) -> Option<Player> {
        self.players.get(&id).cloned()
    }

    fn save(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    fn remove(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CharacterClass;
    use crate::error::RulesError;

    #[test]
    fn test_load_missing_returns_none() {
        let roster = InMemoryRoster::new();
        assert!(roster.load(PlayerId(1)).is_none());
    }

    #[test]
    fn test_save_is_upsert() {
        let mut roster = InMemoryRoster::new();
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Mage);

        roster.save(player.clone());
        player.gold = 999;
        roster.save(player.clone());
        roster.save(player);

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.load(PlayerId(1)).unwrap().gold, 999);
    }

    #[test]
    fn test_remove() {
        let mut roster = InMemoryRoster::new();
        roster.save(Player::new(PlayerId(1), "Aria", CharacterClass::Mage));

        assert!(roster.remove(PlayerId(1)).is_some());
        assert!(roster.remove(PlayerId(1)).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_leaderboard_order() {
        let mut roster = InMemoryRoster::new();
        for (id, level, xp) in [(1, 3, 10), (2, 5, 0), (3, 3, 90)] {
            let mut player = Player::new(PlayerId(id), "P", CharacterClass::Rogue);
            player.level = level;
            player.xp = xp;
            roster.save(player);
        }

        let ids: Vec<_> = roster.leaderboard(10).iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(roster.leaderboard(1).len(), 1);
    }

    #[test]
    fn test_json_snapshot() {
        let mut roster = InMemoryRoster::new();
        roster.save(Player::new(PlayerId(10), "Aria", CharacterClass::Warrior));
        roster.save(Player::new(PlayerId(-5), "Boro", CharacterClass::Cleric));

        let json = roster.to_json().unwrap();
        let restored = InMemoryRoster::from_json(&json).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(PlayerId(-5)).unwrap().name, "Boro");
        assert!(matches!(
            InMemoryRoster::from_json("{"),
            Err(RulesError::Serialization(_))
        ));
    }
}
