//! Player - the combatant snapshot the engine reads and mutates

use super::Combatant;
use crate::catalog::{ArmorCatalog, WeaponCatalog};
use crate::experience::{ExperienceResolver, LevelUp};
use crate::types::{AmmoType, Defense, SkillType};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::info;

/// Highest value a skill can hold
pub const MAX_SKILL: u8 = 100;

/// Equipment change rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Weapon '{0}' is not in the catalog")]
    UnknownWeapon(String),
    #[error("Weapon '{0}' is not owned")]
    WeaponNotOwned(String),
    #[error("Armor '{0}' is not in the catalog")]
    UnknownArmor(String),
}

/// Player state relevant to combat
///
/// Persistence is external; every field round-trips through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: u32,
    /// Cumulative experience, never decreases
    pub experience: u64,
    pub health: u32,
    pub max_health: u32,
    /// Skill levels 0-100; missing skills count as 0
    #[serde(default)]
    pub skills: HashMap<SkillType, u8>,
    pub current_weapon: String,
    #[serde(default)]
    pub current_armor: Option<String>,
    #[serde(default)]
    pub ammo: HashMap<AmmoType, u32>,
    #[serde(default)]
    pub owned_weapons: HashSet<String>,
}

impl Player {
    /// A level 1 player at full health, owning and wielding `weapon`
    pub fn new(name: impl Into<String>, max_health: u32, weapon: impl Into<String>) -> Self {
        let weapon = weapon.into();
        let mut owned_weapons = HashSet::new();
        owned_weapons.insert(weapon.clone());
        Player {
            name: name.into(),
            level: 1,
            experience: 0,
            health: max_health,
            max_health,
            skills: HashMap::new(),
            current_weapon: weapon,
            current_armor: None,
            ammo: HashMap::new(),
            owned_weapons,
        }
    }

    pub fn with_skill(mut self, skill: SkillType, level: u8) -> Self {
        self.set_skill(skill, level);
        self
    }

    pub fn with_ammo(mut self, ammo: AmmoType, amount: u32) -> Self {
        self.add_ammo(ammo, amount);
        self
    }

    pub fn with_armor(mut self, armor: impl Into<String>) -> Self {
        self.current_armor = Some(armor.into());
        self
    }

    pub fn skill(&self, skill: SkillType) -> u8 {
        self.skills.get(&skill).copied().unwrap_or(0).min(MAX_SKILL)
    }

    /// Set a skill, clamped to 0-100
    pub fn set_skill(&mut self, skill: SkillType, level: u8) {
        self.skills.insert(skill, level.min(MAX_SKILL));
    }

    pub fn ammo_count(&self, ammo: AmmoType) -> u32 {
        self.ammo.get(&ammo).copied().unwrap_or(0)
    }

    /// Add rounds to the reserve; melee is never stored
    pub fn add_ammo(&mut self, ammo: AmmoType, amount: u32) {
        if ammo.is_melee() {
            return;
        }
        let count = self.ammo.entry(ammo).or_insert(0);
        *count = count.saturating_add(amount);
    }

    pub fn owns_weapon(&self, name: &str) -> bool {
        self.owned_weapons.contains(name)
    }

    pub fn give_weapon(&mut self, name: impl Into<String>) {
        self.owned_weapons.insert(name.into());
    }

    /// Wield an owned, catalogued weapon
    pub fn equip_weapon(&mut self, name: &str, weapons: &WeaponCatalog) -> Result<(), PlayerError> {
        if !weapons.contains(name) {
            return Err(PlayerError::UnknownWeapon(name.to_string()));
        }
        if !self.owns_weapon(name) {
            return Err(PlayerError::WeaponNotOwned(name.to_string()));
        }
        self.current_weapon = name.to_string();
        Ok(())
    }

    /// Wear catalogued armor, or take it off with `None`
    pub fn equip_armor(&mut self, name: Option<&str>, armor: &ArmorCatalog) -> Result<(), PlayerError> {
        match name {
            Some(name) if !armor.contains(name) => Err(PlayerError::UnknownArmor(name.to_string())),
            Some(name) => {
                self.current_armor = Some(name.to_string());
                Ok(())
            }
            None => {
                self.current_armor = None;
                Ok(())
            }
        }
    }

    /// Restore health, clamped at max. Returns the new health.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health
    }

    /// Add experience and resolve any level-ups it unlocks
    pub fn award_experience(&mut self, amount: u32, resolver: &ExperienceResolver) -> LevelUp {
        self.experience = self.experience.saturating_add(amount as u64);
        let level_up = resolver.check_level_up(self.level, self.experience);
        if level_up.levels_gained > 0 {
            info!(
                player = %self.name,
                from = level_up.previous_level,
                to = level_up.new_level,
                "level up"
            );
        }
        self.level = level_up.new_level;
        level_up
    }
}

impl Combatant for Player {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        self.max_health
    }

    fn defense(&self, armor: &ArmorCatalog) -> Defense {
        armor.defense_of(self.current_armor.as_deref())
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Armor, Weapon};
    use crate::config::ExperienceConstants;
    use crate::types::RollRange;

    fn weapons() -> WeaponCatalog {
        WeaponCatalog::from_entries(vec![
            Weapon::new("Knife", SkillType::MeleeWeapons, AmmoType::Melee, RollRange::new(1, 6)),
            Weapon::new("10mm Pistol", SkillType::SmallGuns, AmmoType::TenMm, RollRange::new(5, 12)),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_player() {
        let player = Player::new("Wanderer", 80, "Knife");
        assert_eq!(player.level, 1);
        assert_eq!(player.health, 80);
        assert!(player.owns_weapon("Knife"));
        assert!(player.is_alive());
    }

    #[test]
    fn test_skill_clamped() {
        let mut player = Player::new("Wanderer", 80, "Knife");
        player.set_skill(SkillType::SmallGuns, 250);
        assert_eq!(player.skill(SkillType::SmallGuns), 100);
        assert_eq!(player.skill(SkillType::BigGuns), 0);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut player = Player::new("Wanderer", 30, "Knife");
        assert_eq!(player.take_damage(12), 18);
        assert_eq!(player.take_damage(500), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut player = Player::new("Wanderer", 30, "Knife");
        player.take_damage(20);
        assert_eq!(player.heal(5), 15);
        assert_eq!(player.heal(100), 30);
    }

    #[test]
    fn test_add_ammo_ignores_melee() {
        let mut player = Player::new("Wanderer", 30, "Knife")
            .with_ammo(AmmoType::TenMm, 12)
            .with_ammo(AmmoType::Melee, 99);
        player.add_ammo(AmmoType::TenMm, 3);
        assert_eq!(player.ammo_count(AmmoType::TenMm), 15);
        assert_eq!(player.ammo_count(AmmoType::Melee), 0);
    }

    #[test]
    fn test_equip_weapon_requires_ownership() {
        let catalog = weapons();
        let mut player = Player::new("Wanderer", 30, "Knife");
        assert_eq!(
            player.equip_weapon("10mm Pistol", &catalog),
            Err(PlayerError::WeaponNotOwned("10mm Pistol".to_string()))
        );
        player.give_weapon("10mm Pistol");
        player.equip_weapon("10mm Pistol", &catalog).unwrap();
        assert_eq!(player.current_weapon, "10mm Pistol");
    }

    #[test]
    fn test_equip_unknown_weapon() {
        let mut player = Player::new("Wanderer", 30, "Knife");
        player.give_weapon("Fat Man");
        assert!(matches!(
            player.equip_weapon("Fat Man", &weapons()),
            Err(PlayerError::UnknownWeapon(_))
        ));
        assert_eq!(player.current_weapon, "Knife");
    }

    #[test]
    fn test_equip_armor() {
        let armor = ArmorCatalog::from_entries(vec![Armor {
            name: "Leather Armor".to_string(),
            armor_class: 15,
            damage_threshold: 2,
            damage_resistance: 0.2,
        }])
        .unwrap();
        let mut player = Player::new("Wanderer", 30, "Knife");
        player.equip_armor(Some("Leather Armor"), &armor).unwrap();
        assert_eq!(player.defense(&armor).damage_threshold, 2);
        assert!(player.equip_armor(Some("Tesla Armor"), &armor).is_err());
        player.equip_armor(None, &armor).unwrap();
        assert_eq!(player.defense(&armor), Defense::none());
    }

    #[test]
    fn test_award_experience_levels_up() {
        let resolver = ExperienceResolver::new(&ExperienceConstants::default());
        let mut player = Player::new("Wanderer", 30, "Knife");
        let level_up = player.award_experience(2500, &resolver);
        assert_eq!(level_up.levels_gained, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 2500);
    }

    #[test]
    fn test_json_round_trip() {
        let player = Player::new("Wanderer", 45, "10mm Pistol")
            .with_skill(SkillType::SmallGuns, 62)
            .with_ammo(AmmoType::TenMm, 24)
            .with_armor("Leather Armor");
        let json = serde_json::to_string(&player).unwrap();
        let restored: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, player);
    }
}
