//! Core types shared by catalogs, combatants and resolvers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill a weapon is governed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    SmallGuns,
    BigGuns,
    EnergyWeapons,
    MeleeWeapons,
    Unarmed,
    Pyrotechnics,
    Throwing,
}

impl SkillType {
    /// Get all skill types
    pub fn all() -> &'static [SkillType] {
        &[
            SkillType::SmallGuns,
            SkillType::BigGuns,
            SkillType::EnergyWeapons,
            SkillType::MeleeWeapons,
            SkillType::Unarmed,
            SkillType::Pyrotechnics,
            SkillType::Throwing,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillType::SmallGuns => "Small Guns",
            SkillType::BigGuns => "Big Guns",
            SkillType::EnergyWeapons => "Energy Weapons",
            SkillType::MeleeWeapons => "Melee Weapons",
            SkillType::Unarmed => "Unarmed",
            SkillType::Pyrotechnics => "Pyrotechnics",
            SkillType::Throwing => "Throwing",
        }
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ammunition a weapon feeds on
///
/// `Melee` is a sentinel: weapons carrying it never touch ammo counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoType {
    Melee,
    #[serde(rename = "9mm")]
    NineMm,
    #[serde(rename = "10mm")]
    TenMm,
    #[serde(rename = "5.56mm")]
    FiveFiftySix,
    ShotgunShell,
    EnergyCell,
    MicrofusionCell,
    Fuel,
    Rocket,
}

impl AmmoType {
    /// Whether this is the no-ammo sentinel
    pub fn is_melee(&self) -> bool {
        matches!(self, AmmoType::Melee)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AmmoType::Melee => "melee",
            AmmoType::NineMm => "9mm",
            AmmoType::TenMm => "10mm",
            AmmoType::FiveFiftySix => "5.56mm",
            AmmoType::ShotgunShell => "shotgun shell",
            AmmoType::EnergyCell => "energy cell",
            AmmoType::MicrofusionCell => "microfusion cell",
            AmmoType::Fuel => "fuel",
            AmmoType::Rocket => "rocket",
        }
    }
}

impl fmt::Display for AmmoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Broad enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Human,
    Creature,
    Mutant,
    Insect,
    Robot,
}

/// Inclusive integer range (`min..=max`) used for damage rolls and spawn counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub min: u32,
    pub max: u32,
}

impl RollRange {
    pub fn new(min: u32, max: u32) -> Self {
        RollRange { min, max }
    }

    /// A range with no variance
    pub fn fixed(value: u32) -> Self {
        RollRange { min: value, max: value }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Mean of the range
    pub fn average(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Defensive profile consulted when a hit lands
///
/// Armor class lowers the attacker's hit chance; threshold and resistance
/// mitigate the damage of hits that connect, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Defense {
    pub armor_class: u32,
    /// Flat damage subtracted before resistance
    pub damage_threshold: u32,
    /// Fraction (0.0 to 1.0) of post-threshold damage absorbed
    pub damage_resistance: f64,
}

impl Defense {
    pub fn new(armor_class: u32, damage_threshold: u32, damage_resistance: f64) -> Self {
        Defense {
            armor_class,
            damage_threshold,
            damage_resistance,
        }
    }

    /// No armor at all
    pub fn none() -> Self {
        Self::default()
    }
}

/// Floor a non-negative scaled value into a whole number.
///
/// The nudge keeps products like `50.0 * 0.7` (which lands on 34.999...)
/// from losing a point to representation error.
pub(crate) fn floor_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + 1e-9).floor().min(u32::MAX as f64) as u32
}
