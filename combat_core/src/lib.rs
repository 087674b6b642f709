//! combat_core - Combat resolution engine for a wasteland survival RPG
//!
//! This library provides:
//! - Catalogs: weapons, armor and enemy templates loaded from TOML
//! - Combatants: the player and spawned enemies, with health and ammo
//! - Resolvers: hit, damage, critical, ammo gate and experience
//! - CombatEngine: one attack at a time, in either direction
//! - Encounters: enemy groups with running stats and kill bonuses
//!
//! Every random draw goes through a [`Dice`] passed in by the caller.

pub mod ammo;
pub mod catalog;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod defense;
pub mod dice;
pub mod experience;
pub mod prelude;
pub mod types;

// Re-export core types for convenience
pub use ammo::AmmoGate;
pub use catalog::{Armor, ArmorCatalog, AttackProfile, Catalog, EnemyCatalog, EnemyTemplate, Weapon, WeaponCatalog};
pub use combat::{
    AttackDirection, AttackOutcome, CombatEngine, CombatResult, Encounter, EncounterStats, Exchange,
    ExperienceAward, HitCalculation, HitResolver,
};
pub use combatant::{Combatant, Enemy, Player, PlayerError};
pub use config::{ConfigError, GameConstants};
pub use damage::{CriticalCalculation, CriticalModifiers, CriticalResolver, DamageCalculation, DamageResolver};
pub use defense::{mitigate, Mitigation};
pub use dice::{Dice, RngDice, ScriptedDice};
pub use experience::{BonusConditions, ExperienceCalculation, ExperienceResolver, ExperienceSource, LevelUp};
pub use types::{AmmoType, Defense, EnemyKind, RollRange, SkillType};
