//! Weapon catalog

use crate::config::ConfigError;
use crate::types::{AmmoType, RollRange, SkillType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Label reported for weapons missing from the catalog
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Immutable weapon definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Unique catalog key, also used for display
    pub name: String,
    pub skill: SkillType,
    pub ammo: AmmoType,
    pub damage: RollRange,
    #[serde(default = "default_clip_size")]
    pub clip_size: u32,
    /// Rounds spent (and required) per attack
    #[serde(default = "default_shots_per_attack")]
    pub shots_per_attack: u32,
    /// Delay before the weapon can fire again, in milliseconds
    #[serde(default)]
    pub cooldown_ms: u64,
    /// Base critical chance, 0-100
    #[serde(default)]
    pub critical_chance: u32,
    /// Flat hit chance modifier
    #[serde(default)]
    pub accuracy: i32,
}

fn default_clip_size() -> u32 {
    1
}

fn default_shots_per_attack() -> u32 {
    1
}

impl Weapon {
    pub fn new(name: impl Into<String>, skill: SkillType, ammo: AmmoType, damage: RollRange) -> Self {
        Weapon {
            name: name.into(),
            skill,
            ammo,
            damage,
            clip_size: default_clip_size(),
            shots_per_attack: default_shots_per_attack(),
            cooldown_ms: 0,
            critical_chance: 0,
            accuracy: 0,
        }
    }

    pub fn with_critical_chance(mut self, chance: u32) -> Self {
        self.critical_chance = chance;
        self
    }

    pub fn with_shots(mut self, shots_per_attack: u32) -> Self {
        self.shots_per_attack = shots_per_attack;
        self.clip_size = self.clip_size.max(shots_per_attack);
        self
    }

    pub fn with_accuracy(mut self, accuracy: i32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_cooldown(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    /// Whether attacking spends ammunition
    pub fn uses_ammo(&self) -> bool {
        !self.ammo.is_melee()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("weapon with empty name"));
        }
        if !self.damage.is_valid() {
            return Err(ConfigError::invalid(format!(
                "weapon '{}' has damage min {} above max {}",
                self.name, self.damage.min, self.damage.max
            )));
        }
        if self.clip_size == 0 {
            return Err(ConfigError::invalid(format!(
                "weapon '{}' has a zero clip size",
                self.name
            )));
        }
        if self.shots_per_attack == 0 {
            return Err(ConfigError::invalid(format!(
                "weapon '{}' fires zero shots per attack",
                self.name
            )));
        }
        if self.critical_chance > 100 {
            return Err(ConfigError::invalid(format!(
                "weapon '{}' critical chance {} exceeds 100",
                self.name, self.critical_chance
            )));
        }
        Ok(())
    }
}

/// TOML file layout: `[[weapons]]` tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponsFile {
    #[serde(default)]
    pub weapons: Vec<Weapon>,
}

/// Read-only weapon lookup keyed by name
#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    weapons: HashMap<String, Weapon>,
}

impl WeaponCatalog {
    /// Build a catalog, rejecting invalid or duplicate entries
    pub fn from_entries(entries: Vec<Weapon>) -> Result<Self, ConfigError> {
        let mut weapons = HashMap::with_capacity(entries.len());
        for weapon in entries {
            weapon.validate()?;
            if weapons.contains_key(&weapon.name) {
                return Err(ConfigError::DuplicateEntry {
                    kind: "weapon",
                    name: weapon.name,
                });
            }
            weapons.insert(weapon.name.clone(), weapon);
        }
        Ok(WeaponCatalog { weapons })
    }

    pub fn get(&self, name: &str) -> Option<&Weapon> {
        self.weapons.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weapons.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Weapon names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.weapons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    /// "min-max" for a known weapon, "Unknown" otherwise
    pub fn damage_range_label(&self, name: &str) -> String {
        match self.get(name) {
            Some(weapon) => weapon.damage.to_string(),
            None => {
                warn!(weapon = name, "damage range requested for unknown weapon");
                UNKNOWN_LABEL.to_string()
            }
        }
    }

    /// Mean damage for a known weapon, 0 otherwise
    pub fn average_damage(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(weapon) => weapon.damage.average(),
            None => {
                warn!(weapon = name, "average damage requested for unknown weapon");
                0.0
            }
        }
    }
}
