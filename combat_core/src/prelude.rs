//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{AmmoType, Defense, EnemyKind, RollRange, SkillType};

// Catalogs
pub use crate::catalog::{Catalog, EnemyTemplate, Weapon};

// Combatants
pub use crate::combatant::{Combatant, Enemy, Player};

// Combat
pub use crate::combat::{AttackOutcome, CombatEngine, CombatResult, Encounter, Exchange};

// Rewards
pub use crate::experience::{BonusConditions, LevelUp};

// Randomness
pub use crate::dice::{Dice, RngDice, ScriptedDice};

// Config
pub use crate::config::GameConstants;
