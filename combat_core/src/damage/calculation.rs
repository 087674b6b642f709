//! Damage calculation - turning a landed hit into a final damage number
//!
//! Order of operations:
//! 1. Roll base damage in the weapon's range
//! 2. Roll for a critical; on success multiply by the critical multiplier
//! 3. Add the attacker's skill bonus
//! 4. Subtract the target's damage threshold (floored at 0)
//! 5. Apply the target's damage resistance (rounded down)
//! 6. Floor the result at the minimum damage of a connecting hit

use super::{CriticalModifiers, CriticalResolver};
use crate::catalog::Weapon;
use crate::combatant::Player;
use crate::config::DamageConstants;
use crate::defense::mitigate;
use crate::dice::Dice;
use crate::types::{Defense, RollRange};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every intermediate quantity of one damage resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageCalculation {
    /// Uniform roll in the weapon's damage range
    pub base_roll: u32,
    pub critical_roll: Option<u32>,
    pub is_critical: bool,
    /// Multiplier applied (1.0 when not critical)
    pub critical_multiplier: f64,
    pub after_critical: u32,
    pub skill_bonus: u32,
    /// Damage entering mitigation
    pub pre_mitigation: u32,
    pub threshold_reduction: u32,
    pub after_threshold: u32,
    pub resistance_reduction: u32,
    pub after_resistance: u32,
    /// Damage actually dealt
    pub final_damage: u32,
}

/// Runs the damage pipeline
#[derive(Debug, Clone)]
pub struct DamageResolver {
    critical: CriticalResolver,
    skill_bonus_threshold: u8,
    skill_bonus_step: u8,
    minimum_damage: u32,
}

impl Default for DamageResolver {
    fn default() -> Self {
        Self::new(&DamageConstants::default(), CriticalResolver::default())
    }
}

impl DamageResolver {
    pub fn new(constants: &DamageConstants, critical: CriticalResolver) -> Self {
        DamageResolver {
            critical,
            skill_bonus_threshold: constants.skill_bonus_threshold,
            skill_bonus_step: constants.skill_bonus_step.max(1),
            minimum_damage: constants.minimum_damage.max(1),
        }
    }

    pub fn critical(&self) -> &CriticalResolver {
        &self.critical
    }

    /// +1 damage per step of skill above the threshold, 0 at or below it
    pub fn skill_bonus(&self, skill_level: u8) -> u32 {
        let above = skill_level.saturating_sub(self.skill_bonus_threshold);
        (above / self.skill_bonus_step) as u32
    }

    /// Resolve the damage of a weapon hit that has already connected
    ///
    /// Without an attacker there is no skill bonus. Dice draws: damage roll,
    /// then critical roll.
    pub fn calculate_damage(
        &self,
        weapon: &Weapon,
        target: &Defense,
        attacker: Option<&Player>,
        dice: &mut impl Dice,
    ) -> DamageCalculation {
        let base_roll = dice.roll_range(weapon.damage.min, weapon.damage.max);

        let critical = self.critical.calculate_final_critical(
            weapon.critical_chance,
            &CriticalModifiers::default(),
            dice,
        );
        let is_critical = critical.is_critical;
        let (after_critical, critical_multiplier) = if is_critical {
            (self.critical.apply(base_roll), self.critical.multiplier())
        } else {
            (base_roll, 1.0)
        };

        let skill_bonus = attacker
            .map(|player| self.skill_bonus(player.skill(weapon.skill)))
            .unwrap_or(0);

        let calc = self.finish(
            base_roll,
            Some(critical.roll),
            is_critical,
            critical_multiplier,
            after_critical,
            skill_bonus,
            target,
        );

        debug!(
            weapon = %weapon.name,
            base = calc.base_roll,
            critical = calc.is_critical,
            skill_bonus = calc.skill_bonus,
            threshold = calc.threshold_reduction,
            resisted = calc.resistance_reduction,
            final_damage = calc.final_damage,
            "damage resolved"
        );

        calc
    }

    /// Damage from a flat range with no critical and no skill bonus
    ///
    /// Used for enemy attacks. Dice draws: damage roll only.
    pub fn calculate_flat_damage(
        &self,
        damage: RollRange,
        target: &Defense,
        dice: &mut impl Dice,
    ) -> DamageCalculation {
        let base_roll = dice.roll_range(damage.min, damage.max);
        self.finish(base_roll, None, false, 1.0, base_roll, 0, target)
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        base_roll: u32,
        critical_roll: Option<u32>,
        is_critical: bool,
        critical_multiplier: f64,
        after_critical: u32,
        skill_bonus: u32,
        target: &Defense,
    ) -> DamageCalculation {
        let pre_mitigation = after_critical.saturating_add(skill_bonus);
        let mitigation = mitigate(pre_mitigation, target);
        let final_damage = mitigation.after_resistance.max(self.minimum_damage);

        DamageCalculation {
            base_roll,
            critical_roll,
            is_critical,
            critical_multiplier,
            after_critical,
            skill_bonus,
            pre_mitigation,
            threshold_reduction: mitigation.threshold_reduction,
            after_threshold: mitigation.after_threshold,
            resistance_reduction: mitigation.resistance_reduction,
            after_resistance: mitigation.after_resistance,
            final_damage,
        }
    }
}
