//! Tunable combat constants

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub hit: HitConstants,
    #[serde(default)]
    pub critical: CriticalConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub experience: ExperienceConstants,
}

impl GameConstants {
    /// Constants shipped with the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(include_str!("../../config/constants.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values the resolvers cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=100).contains(&self.hit.base_chance) {
            return Err(ConfigError::invalid(format!(
                "hit.base_chance must be within 0-100, got {}",
                self.hit.base_chance
            )));
        }
        if self.hit.skill_factor < 0.0 || self.hit.armor_class_factor < 0.0 {
            return Err(ConfigError::invalid("hit factors must not be negative"));
        }
        if self.critical.multiplier < 1.0 {
            return Err(ConfigError::invalid(format!(
                "critical.multiplier must be at least 1.0, got {}",
                self.critical.multiplier
            )));
        }
        if self.critical.skill_factor < 0.0 || self.critical.luck_factor < 0.0 {
            return Err(ConfigError::invalid("critical factors must not be negative"));
        }
        if self.damage.skill_bonus_step == 0 {
            return Err(ConfigError::invalid("damage.skill_bonus_step must be positive"));
        }
        if self.damage.minimum_damage == 0 {
            return Err(ConfigError::invalid("damage.minimum_damage must be at least 1"));
        }
        if self.experience.xp_per_level == 0 {
            return Err(ConfigError::invalid("experience.xp_per_level must be positive"));
        }
        if self.experience.level_penalty < 0.0 || self.experience.difficulty_modifier < 0.0 {
            return Err(ConfigError::invalid(
                "experience modifiers must not be negative",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitConstants {
    /// Hit chance before weapon, skill and defense modifiers
    #[serde(default = "default_base_chance")]
    pub base_chance: i32,
    /// Hit chance gained per skill point
    #[serde(default = "default_hit_skill_factor")]
    pub skill_factor: f64,
    /// Hit chance lost per point of target armor class
    #[serde(default = "default_armor_class_factor")]
    pub armor_class_factor: f64,
}

impl Default for HitConstants {
    fn default() -> Self {
        HitConstants {
            base_chance: default_base_chance(),
            skill_factor: default_hit_skill_factor(),
            armor_class_factor: default_armor_class_factor(),
        }
    }
}

fn default_base_chance() -> i32 {
    50
}
fn default_hit_skill_factor() -> f64 {
    0.5
}
fn default_armor_class_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalConstants {
    /// Damage multiplier on a critical hit
    #[serde(default = "default_critical_multiplier")]
    pub multiplier: f64,
    /// Critical chance gained per skill point
    #[serde(default = "default_critical_skill_factor")]
    pub skill_factor: f64,
    /// Critical chance gained per luck point
    #[serde(default = "default_luck_factor")]
    pub luck_factor: f64,
}

impl Default for CriticalConstants {
    fn default() -> Self {
        CriticalConstants {
            multiplier: default_critical_multiplier(),
            skill_factor: default_critical_skill_factor(),
            luck_factor: default_luck_factor(),
        }
    }
}

fn default_critical_multiplier() -> f64 {
    2.0
}
fn default_critical_skill_factor() -> f64 {
    0.1
}
fn default_luck_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Skill level above which bonus damage starts
    #[serde(default = "default_skill_bonus_threshold")]
    pub skill_bonus_threshold: u8,
    /// Skill points per +1 damage above the threshold
    #[serde(default = "default_skill_bonus_step")]
    pub skill_bonus_step: u8,
    /// Floor applied to every connecting hit
    #[serde(default = "default_minimum_damage")]
    pub minimum_damage: u32,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            skill_bonus_threshold: default_skill_bonus_threshold(),
            skill_bonus_step: default_skill_bonus_step(),
            minimum_damage: default_minimum_damage(),
        }
    }
}

fn default_skill_bonus_threshold() -> u8 {
    50
}
fn default_skill_bonus_step() -> u8 {
    10
}
fn default_minimum_damage() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceConstants {
    /// XP needed to leave level L is `L * xp_per_level`
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u64,
    /// Reward lost per level the player stands above the enemy
    #[serde(default = "default_level_penalty")]
    pub level_penalty: f64,
    #[serde(default = "default_difficulty_modifier")]
    pub difficulty_modifier: f64,
    /// A kill within this many turns counts as a speed kill
    #[serde(default = "default_speed_kill_turns")]
    pub speed_kill_turns: u32,
    #[serde(default)]
    pub bonuses: BonusConstants,
}

impl Default for ExperienceConstants {
    fn default() -> Self {
        ExperienceConstants {
            xp_per_level: default_xp_per_level(),
            level_penalty: default_level_penalty(),
            difficulty_modifier: default_difficulty_modifier(),
            speed_kill_turns: default_speed_kill_turns(),
            bonuses: BonusConstants::default(),
        }
    }
}

fn default_xp_per_level() -> u64 {
    1000
}
fn default_level_penalty() -> f64 {
    0.1
}
fn default_difficulty_modifier() -> f64 {
    1.0
}
fn default_speed_kill_turns() -> u32 {
    3
}

/// Flat bonuses stacked additively onto a 1.0 experience multiplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusConstants {
    #[serde(default = "default_critical_finish")]
    pub critical_finish: f64,
    #[serde(default = "default_perfect_accuracy")]
    pub perfect_accuracy: f64,
    #[serde(default = "default_no_damage_taken")]
    pub no_damage_taken: f64,
    #[serde(default = "default_speed_kill")]
    pub speed_kill: f64,
}

impl Default for BonusConstants {
    fn default() -> Self {
        BonusConstants {
            critical_finish: default_critical_finish(),
            perfect_accuracy: default_perfect_accuracy(),
            no_damage_taken: default_no_damage_taken(),
            speed_kill: default_speed_kill(),
        }
    }
}

fn default_critical_finish() -> f64 {
    0.25
}
fn default_perfect_accuracy() -> f64 {
    0.15
}
fn default_no_damage_taken() -> f64 {
    0.20
}
fn default_speed_kill() -> f64 {
    0.10
}
