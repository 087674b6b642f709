//! Critical hits - a second, independent percentile roll on a landed hit

use crate::config::CriticalConstants;
use crate::dice::Dice;
use crate::types::floor_to_u32;
use serde::{Deserialize, Serialize};

/// Optional contributions to critical chance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CriticalModifiers {
    /// Attacker skill level, 0-100
    pub skill_level: Option<u8>,
    /// Attacker luck
    pub luck: Option<u8>,
}

/// Breakdown of one critical roll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalCalculation {
    pub base_chance: u32,
    pub skill_modifier: u32,
    pub luck_modifier: u32,
    /// Clamped to 0-100
    pub final_chance: u32,
    pub roll: u32,
    pub is_critical: bool,
    pub multiplier: f64,
}

/// Rolls criticals and applies the critical multiplier
#[derive(Debug, Clone)]
pub struct CriticalResolver {
    multiplier: f64,
    skill_factor: f64,
    luck_factor: f64,
}

impl Default for CriticalResolver {
    fn default() -> Self {
        Self::new(&CriticalConstants::default())
    }
}

impl CriticalResolver {
    pub fn new(constants: &CriticalConstants) -> Self {
        CriticalResolver {
            multiplier: constants.multiplier,
            skill_factor: constants.skill_factor,
            luck_factor: constants.luck_factor,
        }
    }

    /// Same resolver with a different critical multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Base chance plus skill and luck contributions, clamped to 0-100
    pub fn final_chance(&self, base_chance: u32, modifiers: &CriticalModifiers) -> u32 {
        let (skill, luck) = self.modifier_values(modifiers);
        base_chance.saturating_add(skill).saturating_add(luck).min(100)
    }

    /// Combine modifiers into a final chance and roll against it
    pub fn calculate_final_critical(
        &self,
        base_chance: u32,
        modifiers: &CriticalModifiers,
        dice: &mut impl Dice,
    ) -> CriticalCalculation {
        let (skill_modifier, luck_modifier) = self.modifier_values(modifiers);
        let final_chance = self.final_chance(base_chance, modifiers);
        let roll = dice.percentile();

        CriticalCalculation {
            base_chance,
            skill_modifier,
            luck_modifier,
            final_chance,
            roll,
            is_critical: roll <= final_chance,
            multiplier: self.multiplier,
        }
    }

    /// Single percentile draw against `chance`
    ///
    /// Chance 0 never crits, 100 always does.
    pub fn check_critical(&self, chance: u32, dice: &mut impl Dice) -> bool {
        dice.percentile() <= chance.min(100)
    }

    /// Scale damage by the critical multiplier, rounding down
    pub fn apply(&self, damage: u32) -> u32 {
        floor_to_u32(damage as f64 * self.multiplier)
    }

    fn modifier_values(&self, modifiers: &CriticalModifiers) -> (u32, u32) {
        let skill = modifiers
            .skill_level
            .map(|level| floor_to_u32(level as f64 * self.skill_factor))
            .unwrap_or(0);
        let luck = modifiers
            .luck
            .map(|luck| floor_to_u32(luck as f64 * self.luck_factor))
            .unwrap_or(0);
        (skill, luck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn test_final_chance_without_modifiers() {
        let resolver = CriticalResolver::default();
        assert_eq!(resolver.final_chance(7, &CriticalModifiers::default()), 7);
    }

    #[test]
    fn test_final_chance_with_modifiers() {
        let resolver = CriticalResolver::default();
        let modifiers = CriticalModifiers {
            skill_level: Some(75),
            luck: Some(6),
        };
        // 5 + floor(75 * 0.1) + 6 * 1
        assert_eq!(resolver.final_chance(5, &modifiers), 18);
    }

    #[test]
    fn test_final_chance_clamped() {
        let resolver = CriticalResolver::default();
        let modifiers = CriticalModifiers {
            skill_level: Some(100),
            luck: Some(200),
        };
        assert_eq!(resolver.final_chance(95, &modifiers), 100);
    }

    #[test]
    fn test_check_critical_bounds() {
        let resolver = CriticalResolver::default();
        let mut dice = ScriptedDice::new([1, 100, 10, 11]);
        assert!(!resolver.check_critical(0, &mut dice));
        assert!(resolver.check_critical(100, &mut dice));
        assert!(resolver.check_critical(10, &mut dice));
        assert!(!resolver.check_critical(10, &mut dice));
    }

    #[test]
    fn test_calculate_final_critical_breakdown() {
        let resolver = CriticalResolver::default();
        let modifiers = CriticalModifiers {
            skill_level: Some(40),
            luck: None,
        };
        let mut dice = ScriptedDice::new([14]);
        let calc = resolver.calculate_final_critical(10, &modifiers, &mut dice);
        assert_eq!(calc.skill_modifier, 4);
        assert_eq!(calc.luck_modifier, 0);
        assert_eq!(calc.final_chance, 14);
        assert_eq!(calc.roll, 14);
        assert!(calc.is_critical);
    }

    #[test]
    fn test_apply_multiplier() {
        let resolver = CriticalResolver::default();
        assert_eq!(resolver.apply(9), 18);

        let resolver = resolver.with_multiplier(1.5);
        assert_eq!(resolver.apply(9), 13);
        assert!((resolver.multiplier() - 1.5).abs() < f64::EPSILON);
    }
}
