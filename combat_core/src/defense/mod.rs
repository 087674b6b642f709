//! Defense system - Damage threshold and damage resistance
//!
//! Mitigation always runs threshold first, then resistance:
//! `floor(max(0, damage - threshold) * (1 - resistance))`.
//! Reversing the order changes game balance (20 dmg, DT 5, DR 50% gives 7,
//! not 5).

mod resistance;
mod threshold;

pub use resistance::{apply_resistance, resistance_reduction};
pub use threshold::apply_threshold;

use crate::types::Defense;
use serde::{Deserialize, Serialize};

/// Breakdown of one mitigation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mitigation {
    /// Damage before mitigation
    pub incoming: u32,
    /// Damage removed by the threshold
    pub threshold_reduction: u32,
    pub after_threshold: u32,
    /// Damage removed by resistance
    pub resistance_reduction: u32,
    pub after_resistance: u32,
}

impl Mitigation {
    /// Total damage prevented
    pub fn total_reduction(&self) -> u32 {
        self.threshold_reduction + self.resistance_reduction
    }
}

/// Run incoming damage through a defensive profile
pub fn mitigate(damage: u32, defense: &Defense) -> Mitigation {
    let after_threshold = apply_threshold(damage, defense.damage_threshold);
    let after_resistance = apply_resistance(after_threshold, defense.damage_resistance);

    Mitigation {
        incoming: damage,
        threshold_reduction: damage - after_threshold,
        after_threshold,
        resistance_reduction: after_threshold - after_resistance,
        after_resistance,
    }
}
