//! Enemy template catalog

use super::WeaponCatalog;
use crate::config::ConfigError;
use crate::types::{Defense, EnemyKind, RollRange};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How an enemy archetype attacks
///
/// Each style carries exactly the fields it needs, so resolvers branch on
/// the tag instead of probing for optional data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum AttackProfile {
    /// Claws, fists, bites, stingers
    Natural { hit_chance: u32, damage: RollRange },
    /// A catalog weapon; the enemy never runs out of ammo
    EquippedWeapon { hit_chance: u32, weapon: String },
    /// A group firing several independent shots per turn
    RangedSquad {
        hit_chance: u32,
        damage: RollRange,
        shots: u32,
    },
}

impl AttackProfile {
    /// Flat hit chance, 0-100
    pub fn hit_chance(&self) -> u32 {
        match self {
            AttackProfile::Natural { hit_chance, .. }
            | AttackProfile::EquippedWeapon { hit_chance, .. }
            | AttackProfile::RangedSquad { hit_chance, .. } => *hit_chance,
        }
    }

    /// Independent hit draws per turn
    pub fn shots(&self) -> u32 {
        match self {
            AttackProfile::RangedSquad { shots, .. } => *shots,
            _ => 1,
        }
    }

    fn validate(&self, owner: &str, weapons: &WeaponCatalog) -> Result<(), ConfigError> {
        if self.hit_chance() > 100 {
            return Err(ConfigError::invalid(format!(
                "enemy '{}' hit chance {} exceeds 100",
                owner,
                self.hit_chance()
            )));
        }
        match self {
            AttackProfile::Natural { damage, .. } | AttackProfile::RangedSquad { damage, .. }
                if !damage.is_valid() =>
            {
                Err(ConfigError::invalid(format!(
                    "enemy '{}' has damage min {} above max {}",
                    owner, damage.min, damage.max
                )))
            }
            AttackProfile::RangedSquad { shots: 0, .. } => Err(ConfigError::invalid(format!(
                "enemy '{}' squad fires zero shots",
                owner
            ))),
            AttackProfile::EquippedWeapon { weapon, .. } if !weapons.contains(weapon) => {
                Err(ConfigError::invalid(format!(
                    "enemy '{}' is equipped with unknown weapon '{}'",
                    owner, weapon
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Defensive stats of an enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefense {
    pub health: u32,
    #[serde(default)]
    pub armor_class: u32,
    #[serde(default)]
    pub damage_threshold: u32,
    #[serde(default)]
    pub damage_resistance: f64,
}

impl EnemyDefense {
    pub fn defense(&self) -> Defense {
        Defense::new(self.armor_class, self.damage_threshold, self.damage_resistance)
    }
}

/// Immutable enemy archetype that encounter instances are spawned from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub kind: EnemyKind,
    pub max_level: u32,
    pub defense: EnemyDefense,
    pub attack: AttackProfile,
    /// Base experience for a kill
    pub experience: u32,
    pub spawn_count: RollRange,
    /// Display-name variants; instances fall back to `name` when empty
    #[serde(default)]
    pub titles: Vec<String>,
}

impl EnemyTemplate {
    pub(crate) fn validate(&self, weapons: &WeaponCatalog) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("enemy with empty name"));
        }
        if self.defense.health == 0 {
            return Err(ConfigError::invalid(format!(
                "enemy '{}' has zero health",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.defense.damage_resistance) {
            return Err(ConfigError::invalid(format!(
                "enemy '{}' resistance {} outside 0.0-1.0",
                self.name, self.defense.damage_resistance
            )));
        }
        if self.spawn_count.min == 0 || !self.spawn_count.is_valid() {
            return Err(ConfigError::invalid(format!(
                "enemy '{}' spawn count {} must satisfy 1 <= min <= max",
                self.name, self.spawn_count
            )));
        }
        self.attack.validate(&self.name, weapons)
    }
}

/// TOML file layout: `[[enemies]]` tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemiesFile {
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
}

/// Read-only enemy template lookup keyed by name
#[derive(Debug, Clone, Default)]
pub struct EnemyCatalog {
    templates: HashMap<String, EnemyTemplate>,
}

impl EnemyCatalog {
    /// Build a catalog; equipped-weapon profiles must reference `weapons`
    pub fn from_entries(
        entries: Vec<EnemyTemplate>,
        weapons: &WeaponCatalog,
    ) -> Result<Self, ConfigError> {
        let mut templates = HashMap::with_capacity(entries.len());
        for template in entries {
            template.validate(weapons)?;
            if templates.contains_key(&template.name) {
                return Err(ConfigError::DuplicateEntry {
                    kind: "enemy",
                    name: template.name,
                });
            }
            templates.insert(template.name.clone(), template);
        }
        Ok(EnemyCatalog { templates })
    }

    pub fn get(&self, name: &str) -> Option<&EnemyTemplate> {
        self.templates.get(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.templates.values()
    }
}
