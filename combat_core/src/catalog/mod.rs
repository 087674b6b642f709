//! Static catalogs - weapons, armor and enemy templates
//!
//! Catalogs are loaded once, validated at load time and read-only afterwards.
//! Resolvers assume well-formed entries; this is the only place bad data is
//! rejected.

mod armor;
mod enemies;
mod weapons;

pub use armor::{Armor, ArmorCatalog, ArmorFile};
pub use enemies::{AttackProfile, EnemiesFile, EnemyCatalog, EnemyDefense, EnemyTemplate};
pub use weapons::{Weapon, WeaponCatalog, WeaponsFile, UNKNOWN_LABEL};

use crate::config::{self, ConfigError};
use std::path::Path;
use tracing::info;

pub const WEAPONS_FILE: &str = "weapons.toml";
pub const ARMOR_FILE: &str = "armor.toml";
pub const ENEMIES_FILE: &str = "enemies.toml";

/// All three catalogs, cross-validated
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub weapons: WeaponCatalog,
    pub armor: ArmorCatalog,
    pub enemies: EnemyCatalog,
}

impl Catalog {
    pub fn new(
        weapons: Vec<Weapon>,
        armor: Vec<Armor>,
        enemies: Vec<EnemyTemplate>,
    ) -> Result<Self, ConfigError> {
        let weapons = WeaponCatalog::from_entries(weapons)?;
        let armor = ArmorCatalog::from_entries(armor)?;
        let enemies = EnemyCatalog::from_entries(enemies, &weapons)?;

        info!(
            weapons = weapons.len(),
            armor = armor.len(),
            enemies = enemies.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            weapons,
            armor,
            enemies,
        })
    }

    /// Parse the three catalog files from TOML strings
    pub fn parse(weapons: &str, armor: &str, enemies: &str) -> Result<Self, ConfigError> {
        let weapons: WeaponsFile = config::parse_toml(weapons)?;
        let armor: ArmorFile = config::parse_toml(armor)?;
        let enemies: EnemiesFile = config::parse_toml(enemies)?;
        Self::new(weapons.weapons, armor.armor, enemies.enemies)
    }

    /// Load `weapons.toml`, `armor.toml` and `enemies.toml` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let weapons: WeaponsFile = config::load_toml(&dir.join(WEAPONS_FILE))?;
        let armor: ArmorFile = config::load_toml(&dir.join(ARMOR_FILE))?;
        let enemies: EnemiesFile = config::load_toml(&dir.join(ENEMIES_FILE))?;
        Self::new(weapons.weapons, armor.armor, enemies.enemies)
    }

    /// Catalog shipped with the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::parse(
            include_str!("../../config/weapons.toml"),
            include_str!("../../config/armor.toml"),
            include_str!("../../config/enemies.toml"),
        )
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.get(name)
    }

    pub fn enemy(&self, name: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(name)
    }
}
