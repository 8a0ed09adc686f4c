//! # Narrative Core
//!
//! Turns resolved combat actions into text for the chat layer. This crate reads
//! `game_rules` outcomes and never changes game state.
//!
//! ## Core Components
//!
//! - **events**: Ordered combat events extracted from a `CombatResult`
//! - **narrator**: Renders events as short Spanish lines

pub mod events;
pub mod narrator;

pub use events::*;
pub use narrator::*;
