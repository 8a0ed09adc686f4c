//! Player character definition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Attributes, CharacterClass, Enemy, Equipment, EquipmentSlot, Inventory, Item, ItemKind,
    PlayerId, Pool,
};
use crate::error::{RulesError, RulesResult};
use crate::mechanics::progression;

pub const BASE_HP: u32 = 100;
pub const BASE_ENERGY: u32 = 100;
pub const BASE_MANA: u32 = 50;
pub const BASE_STAMINA: u32 = 100;
pub const STARTING_GOLD: u64 = 50;
const STARTING_POTIONS: usize = 2;
const STARTING_POTION_HEAL: u32 = 30;

/// A player character, owned by the caller's session and persisted between actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub class: CharacterClass,

    /// 1..=50.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub xp: u32,

    pub attributes: Attributes,

    pub hp: Pool,
    pub energy: Pool,
    pub mana: Pool,
    pub stamina: Pool,

    pub equipment: Equipment,
    pub inventory: Inventory,
    pub gold: u64,

    /// The opponent of the running encounter. Being in combat means this is set.
    #[serde(default)]
    current_enemy: Option<Enemy>,
}

impl Player {
    /// Create a level-1 character with the class's starting package.
    pub fn new(id: PlayerId, name: impl Into<String>, class: CharacterClass) -> Self {
        let profile = class.profile();

        let mut equipment = Equipment::default();
        equipment.replace(EquipmentSlot::Weapon, profile.starting_weapon());
        equipment.replace(EquipmentSlot::Armor, profile.starting_armor());

        let inventory = Inventory::with_items(
            (0..STARTING_POTIONS).map(|_| Item::potion("Poción Menor", STARTING_POTION_HEAL)),
        );

        Self {
            id,
            name: name.into(),
            class,
            level: 1,
            xp: 0,
            attributes: profile.attributes,
            hp: Pool::full(BASE_HP + profile.bonus_hp),
            energy: Pool::full(BASE_ENERGY),
            mana: Pool::full(BASE_MANA + profile.bonus_mana),
            stamina: Pool::full(BASE_STAMINA),
            equipment,
            inventory,
            gold: STARTING_GOLD,
            current_enemy: None,
        }
    }

    /// Attack value: the class's attack attribute plus the equipped weapon bonus.
    pub fn total_attack(&self) -> u32 {
        let base = self.attributes.get(self.class.profile().attack_attribute);
        base.saturating_add(self.equipment.attack_bonus())
    }

    /// Defense value: half of Dexterity plus the equipped armor bonus.
    pub fn total_defense(&self) -> u32 {
        (self.attributes.dexterity / 2).saturating_add(self.equipment.defense_bonus())
    }

    /// Experience required to complete the current level.
    pub fn xp_needed(&self) -> u32 {
        progression::xp_needed(self.level)
    }

    /// `(current, needed)` for progress bars.
    pub fn xp_progress(&self) -> (u32, u32) {
        (self.xp, self.xp_needed())
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    pub fn is_in_combat(&self) -> bool {
        self.current_enemy.is_some()
    }

    pub fn current_enemy(&self) -> Option<&Enemy> {
        self.current_enemy.as_ref()
    }

    /// Begin an encounter against `enemy`.
    pub fn engage(&mut self, enemy: Enemy) -> RulesResult<()> {
        if self.is_in_combat() {
            return Err(RulesError::AlreadyInCombat);
        }
        if !self.is_alive() {
            return Err(RulesError::PlayerIncapacitated);
        }
        self.current_enemy = Some(enemy);
        Ok(())
    }

    /// End the running encounter, discarding the enemy.
    pub fn disengage(&mut self) -> Option<Enemy> {
        self.current_enemy.take()
    }

    pub(crate) fn resume(&mut self, enemy: Enemy) {
        self.current_enemy = Some(enemy);
    }

    /// Equip a weapon or armor from the inventory.
    ///
    /// Any item already in that slot goes back to the inventory.
    pub fn equip(&mut self, item_name: &str) -> RulesResult<()> {
        let slot = self
            .inventory
            .find(item_name)
            .ok_or_else(|| RulesError::ItemNotFound(item_name.to_string()))?
            .slot()
            .ok_or_else(|| RulesError::NotEquippable(item_name.to_string()))?;

        let item = self
            .inventory
            .remove(item_name)
            .ok_or_else(|| RulesError::ItemNotFound(item_name.to_string()))?;
        debug!(player_id = %self.id, item = %item.name, ?slot, "equipping item");

        if let Some(previous) = self.equipment.replace(slot, item) {
            // The equipped item just freed a slot, so this cannot overflow.
            self.inventory.add(previous)?;
        }
        Ok(())
    }

    /// Move the item in `slot` back to the inventory.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> RulesResult<Item> {
        if self.inventory.is_full() {
            return Err(RulesError::InventoryFull {
                capacity: self.inventory.capacity(),
            });
        }
        let item = self
            .equipment
            .take(slot)
            .ok_or_else(|| RulesError::ItemNotFound(format!("{:?}", slot)))?;
        self.inventory.add(item.clone())?;
        Ok(item)
    }

    /// Drink a potion from the inventory. Returns the HP actually restored.
    pub fn use_potion(&mut self, item_name: &str) -> RulesResult<u32> {
        let heal = match self.inventory.find(item_name).map(|item| item.kind) {
            Some(ItemKind::Potion { heal }) => heal,
            Some(_) => return Err(RulesError::NotEquippable(item_name.to_string())),
            None => return Err(RulesError::ItemNotFound(item_name.to_string())),
        };
        self.inventory.remove(item_name);
        Ok(self.hp.restore(heal))
    }

    /// Serialize for the external state store.
    pub fn to_json(&self) -> RulesResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore from the external state store.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityId;
    use crate::mechanics::Difficulty;

    fn rat() -> Enemy {
        Enemy {
            id: EntityId::nil(),
            name: "Rata Gigante".to_string(),
            emoji: "🐀".to_string(),
            level: 1,
            hp: Pool::full(20),
            attack: 6,
            defense: 1,
            xp_reward: 15,
            gold_reward: 10,
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_new_warrior() {
        let player = Player::new(PlayerId(1), "Aria", CharacterClass::Warrior);
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 0);
        assert_eq!(player.attributes.strength, 14);
        assert_eq!(player.hp.max(), 120);
        assert!(player.hp.is_full());
        assert_eq!(player.gold, STARTING_GOLD);
        assert!(!player.is_in_combat());
        assert_eq!(player.inventory.len(), STARTING_POTIONS);
        assert_eq!(player.inventory.capacity(), crate::entities::INVENTORY_CAPACITY);
    }

    #[test]
    fn test_xp_progress_tracks_threshold() {
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Warrior);
        assert_eq!(player.xp_progress(), (0, 100));

        progression::add_xp(&mut player, 130);
        assert_eq!(player.level, 2);
        assert_eq!(player.xp_progress(), (30, 200));
        assert_eq!(player.xp_progress().1, progression::xp_needed(player.level));
    }

    #[test]
    fn test_derived_stats() {
        let player = Player::new(PlayerId(1), "Aria", CharacterClass::Warrior);
        // Strength 14 + Espada de Hierro 5
        assert_eq!(player.total_attack(), 19);
        // Dexterity 10 / 2 + Cota de Malla 3
        assert_eq!(player.total_defense(), 8);

        let mage = Player::new(PlayerId(2), "Merlín", CharacterClass::Mage);
        assert_eq!(mage.total_attack(), 15 + 6);
    }

    #[test]
    fn test_derived_stats_follow_equipment() {
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Warrior);
        player.unequip(EquipmentSlot::Weapon).unwrap();
        assert_eq!(player.total_attack(), 14);

        player.inventory.add(Item::weapon("Hacha Rúnica", 9)).unwrap();
        player.equip("Hacha Rúnica").unwrap();
        assert_eq!(player.total_attack(), 23);

        player.equip("Espada de Hierro").unwrap();
        assert_eq!(player.total_attack(), 19);
        assert!(player.inventory.find("Hacha Rúnica").is_some());
    }

    #[test]
    fn test_equip_errors() {
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Rogue);
        assert_eq!(
            player.equip("Excalibur"),
            Err(RulesError::ItemNotFound("Excalibur".to_string()))
        );
        assert_eq!(
            player.equip("Poción Menor"),
            Err(RulesError::NotEquippable("Poción Menor".to_string()))
        );
    }

    #[test]
    fn test_unequip_needs_room() {
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Rogue);
        while !player.inventory.is_full() {
            player.inventory.add(Item::potion("Relleno", 1)).unwrap();
        }
        assert!(matches!(
            player.unequip(EquipmentSlot::Armor),
            Err(RulesError::InventoryFull { .. })
        ));
        assert!(player.equipment.armor.is_some());
    }

    #[test]
    fn test_use_potion_clamps_to_max() {
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Cleric);
        player.hp.deplete(10);

        assert_eq!(player.use_potion("Poción Menor").unwrap(), 10);
        assert!(player.hp.is_full());
        assert_eq!(player.inventory.len(), STARTING_POTIONS - 1);
    }

    #[test]
    fn test_combat_state_consistency() {
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Warrior);
        player.engage(rat()).unwrap();
        assert!(player.is_in_combat());
        assert_eq!(player.engage(rat()), Err(RulesError::AlreadyInCombat));

        assert!(player.disengage().is_some());
        assert!(!player.is_in_combat());
        assert!(player.current_enemy().is_none());
    }

    #[test]
    fn test_dead_player_cannot_engage() {
        let mut player = Player::new(PlayerId(1), "Aria", CharacterClass::Warrior);
        player.hp.deplete(u32::MAX);
        assert_eq!(player.engage(rat()), Err(RulesError::PlayerIncapacitated));
    }

    #[test]
    fn test_json_snapshot() {
        let mut player = Player::new(PlayerId(77), "Aria", CharacterClass::Ranger);
        player.engage(rat()).unwrap();

        let json = player.to_json().unwrap();
        let restored = Player::from_json(&json).unwrap();
        assert_eq!(restored, player);
        assert!(restored.is_in_combat());
    }

    #[test]
    fn test_from_json_clamps_pools() {
        let player = Player::new(PlayerId(5), "Aria", CharacterClass::Warrior);
        let json = player
            .to_json()
            .unwrap()
            .replace(r#""hp":{"current":120,"max":120}"#, r#""hp":{"current":9999,"max":120}"#);
        assert!(json.contains("9999"));

        let restored = Player::from_json(&json).unwrap();
        assert_eq!(restored.hp.current(), 120);
        assert_eq!(restored.hp.max(), 120);
    }
}
