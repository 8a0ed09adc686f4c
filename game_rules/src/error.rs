//! Error type for rule violations the caller is expected to prevent.

use thiserror::Error;

use crate::mechanics::Difficulty;

/// Errors returned when an action is requested in a state that does not allow it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("player is not in combat")]
    NotInCombat,

    #[error("player is already in combat")]
    AlreadyInCombat,

    #[error("player has no hit points left")]
    PlayerIncapacitated,

    #[error("not enough energy: need {required}, have {available}")]
    NotEnoughEnergy { required: u32, available: u32 },

    #[error("not enough gold: need {required}, have {available}")]
    NotEnoughGold { required: u64, available: u64 },

    #[error("inventory is full ({capacity} slots)")]
    InventoryFull { capacity: usize },

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("item cannot be equipped: {0}")]
    NotEquippable(String),

    #[error("no enemy archetypes for difficulty {0:?}")]
    EmptyArchetypePool(Difficulty),

    #[error("invalid enemy catalog: {0}")]
    InvalidCatalog(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for RulesError {
    fn from(err: toml::de::Error) -> Self {
        RulesError::InvalidCatalog(err.to_string())
    }
}

impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        RulesError::Serialization(err.to_string())
    }
}

/// Result alias used throughout the rules engine.
pub type RulesResult<T> = Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RulesError::NotEnoughEnergy {
            required: 10,
            available: 3,
        };
        assert_eq!(err.to_string(), "not enough energy: need 10, have 3");
        assert_eq!(RulesError::NotInCombat.to_string(), "player is not in combat");
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse: Result<toml::Value, _> = toml::from_str("not = [valid");
        let err: RulesError = parse.unwrap_err().into();
        assert!(matches!(err, RulesError::InvalidCatalog(_)));
    }
}
