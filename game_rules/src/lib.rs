//! # Game Rules
//!
//! The combat and progression engine of the RPG: dice, character stats, enemy
//! generation, turn resolution and level-ups. This crate is the single source
//! of truth for game rules and contains no presentation or storage I/O; callers
//! hand it a player, get back a [`CombatResult`], and persist the player.

pub mod entities;
pub mod error;
pub mod mechanics;
pub mod roster;
pub mod session;

pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use roster::*;
pub use session::*;
