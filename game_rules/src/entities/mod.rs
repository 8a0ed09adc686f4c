//! Entity definitions: players, enemies, items and class profiles.

mod class;
mod components;
mod enemy;
mod items;
mod player;

pub use class::*;
pub use components::*;
pub use enemy::*;
pub use items::*;
pub use player::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a generated enemy, used to tell encounters apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// All-zero id for fixtures that need a stable value.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form is enough to correlate log lines.
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

/// Numeric identity of a player, as assigned by the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
        assert!(EntityId::nil().is_nil());
        assert_eq!(EntityId::nil().to_string(), "00000000");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(123456789).to_string(), "123456789");
    }
}
