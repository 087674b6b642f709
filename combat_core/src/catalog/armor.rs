//! Armor catalog

use crate::config::ConfigError;
use crate::types::Defense;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Immutable armor definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    #[serde(default)]
    pub armor_class: u32,
    #[serde(default)]
    pub damage_threshold: u32,
    #[serde(default)]
    pub damage_resistance: f64,
}

impl Armor {
    pub fn defense(&self) -> Defense {
        Defense::new(self.armor_class, self.damage_threshold, self.damage_resistance)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("armor with empty name"));
        }
        if !(0.0..=1.0).contains(&self.damage_resistance) {
            return Err(ConfigError::invalid(format!(
                "armor '{}' resistance {} outside 0.0-1.0",
                self.name, self.damage_resistance
            )));
        }
        Ok(())
    }
}

/// TOML file layout: `[[armor]]` tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorFile {
    #[serde(default)]
    pub armor: Vec<Armor>,
}

/// Read-only armor lookup keyed by name
#[derive(Debug, Clone, Default)]
pub struct ArmorCatalog {
    armor: HashMap<String, Armor>,
}

impl ArmorCatalog {
    pub fn from_entries(entries: Vec<Armor>) -> Result<Self, ConfigError> {
        let mut armor = HashMap::with_capacity(entries.len());
        for piece in entries {
            piece.validate()?;
            if armor.contains_key(&piece.name) {
                return Err(ConfigError::DuplicateEntry {
                    kind: "armor",
                    name: piece.name,
                });
            }
            armor.insert(piece.name.clone(), piece);
        }
        Ok(ArmorCatalog { armor })
    }

    pub fn get(&self, name: &str) -> Option<&Armor> {
        self.armor.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.armor.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.armor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armor.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.armor.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Defense granted by the named armor; unarmored for `None` or unknown names
    pub fn defense_of(&self, name: Option<&str>) -> Defense {
        let Some(name) = name else {
            return Defense::none();
        };
        match self.get(name) {
            Some(armor) => armor.defense(),
            None => {
                warn!(armor = name, "unknown armor treated as no armor");
                Defense::none()
            }
        }
    }
}
