//! Experience and level-ups.

use tracing::info;

use crate::entities::{Attribute, Player};

/// Hard level cap. Experience past the cap is retained but never converts.
pub const MAX_LEVEL: u32 = 50;

pub const HP_PER_LEVEL: u32 = 10;
pub const ENERGY_PER_LEVEL: u32 = 5;
pub const ATTRIBUTE_PER_LEVEL: u32 = 2;

/// Attributes raised by every level-up.
const LEVEL_UP_ATTRIBUTES: [Attribute; 3] = [
    Attribute::Strength,
    Attribute::Intelligence,
    Attribute::Dexterity,
];

/// Experience needed to complete `level`.
///
/// Both leveling and progress displays go through this function.
pub fn xp_needed(level: u32) -> u32 {
    level.max(1).saturating_mul(100)
}

/// What a call to [`add_xp`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub new_level: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Grant experience, applying as many level-ups as it pays for.
pub fn add_xp(player: &mut Player, amount: u32) -> LevelUpReport {
    player.xp = player.xp.saturating_add(amount);

    let mut levels_gained = 0;
    while player.level < MAX_LEVEL && player.xp >= xp_needed(player.level) {
        player.xp -= xp_needed(player.level);
        level_up(player);
        levels_gained += 1;
    }

    if levels_gained > 0 {
        info!(
            player_id = %player.id,
            level = player.level,
            levels_gained,
            "player leveled up"
        );
    }

    LevelUpReport {
        levels_gained,
        new_level: player.level,
    }
}

fn level_up(player: &mut Player) {
    player.level += 1;

    player.hp.raise_max(HP_PER_LEVEL);
    player.hp.fill();

    player.energy.raise_max(ENERGY_PER_LEVEL);
    player.energy.fill();

    for attribute in LEVEL_UP_ATTRIBUTES {
        player.attributes.increase(attribute, ATTRIBUTE_PER_LEVEL);
    }
}
