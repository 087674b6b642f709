//! CombatResult - outcome of one attack

use super::hit::HitCalculation;
use crate::damage::DamageCalculation;
use serde::{Deserialize, Serialize};

/// Who is attacking whom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackDirection {
    PlayerToEnemy,
    EnemyToPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackOutcome {
    Hit,
    Critical,
    Miss,
    /// The ammo gate refused the attack; nothing was rolled
    OutOfAmmo,
    /// The attack referenced a weapon missing from the catalog
    UnknownWeapon,
}

/// Result of resolving one attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    // === Outcome ===
    pub direction: AttackDirection,
    pub outcome: AttackOutcome,
    pub is_hit: bool,
    /// Damage dealt to the target, summed over every shot
    pub damage: u32,
    pub is_critical: bool,

    // === Target state ===
    pub remaining_health: u32,
    /// This attack took the target from alive to 0 health
    pub is_killing_blow: bool,

    // === Bookkeeping ===
    pub ammo_spent: u32,
    /// Shots that connected; at most one for player attacks
    pub hits_landed: u32,
    pub message: String,
    /// Every hit roll made, in order
    pub hits: Vec<HitCalculation>,
    /// Damage breakdown per connecting shot
    pub damage_rolls: Vec<DamageCalculation>,
    /// Caller-supplied time, unset by the engine
    pub timestamp: Option<u64>,
}

impl CombatResult {
    /// A result where nothing happened to the target
    pub fn new(direction: AttackDirection, outcome: AttackOutcome, remaining_health: u32) -> Self {
        CombatResult {
            direction,
            outcome,
            is_hit: false,
            damage: 0,
            is_critical: false,
            remaining_health,
            is_killing_blow: false,
            ammo_spent: 0,
            hits_landed: 0,
            message: String::new(),
            hits: Vec::new(),
            damage_rolls: Vec::new(),
            timestamp: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Whether any dice were rolled (false for ammo and catalog failures)
    pub fn attempted(&self) -> bool {
        !matches!(self.outcome, AttackOutcome::OutOfAmmo | AttackOutcome::UnknownWeapon)
    }

    /// Damage removed by threshold and resistance across every shot
    pub fn total_mitigated(&self) -> u32 {
        self.damage_rolls
            .iter()
            .map(|roll| roll.threshold_reduction + roll.resistance_reduction)
            .sum()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        match self.outcome {
            AttackOutcome::OutOfAmmo => parts.push("out of ammo".to_string()),
            AttackOutcome::UnknownWeapon => parts.push("unknown weapon".to_string()),
            AttackOutcome::Miss => parts.push("miss".to_string()),
            AttackOutcome::Hit | AttackOutcome::Critical => {
                parts.push(format!("{} damage", self.damage));
            }
        }

        if self.is_critical {
            parts.push("CRITICAL".to_string());
        }

        let mitigated = self.total_mitigated();
        if mitigated > 0 {
            parts.push(format!("{} mitigated", mitigated));
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        parts.join(", ")
    }
}
