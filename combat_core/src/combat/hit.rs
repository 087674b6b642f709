//! Hit resolution - does the attack connect at all

use crate::catalog::Weapon;
use crate::combatant::Player;
use crate::config::HitConstants;
use crate::dice::Dice;
use crate::types::{floor_to_u32, Defense};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Breakdown of one hit roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitCalculation {
    pub base_chance: i32,
    pub weapon_modifier: i32,
    /// Bonus from the attacker's weapon skill
    pub skill_modifier: i32,
    /// Penalty from the target's armor class, zero or negative
    pub defense_modifier: i32,
    /// Clamped to 0-100
    pub final_chance: u32,
    /// Percentile draw, 1-100
    pub roll: u32,
    pub is_hit: bool,
}

/// Rolls to-hit for skill-based and flat attacks
#[derive(Debug, Clone)]
pub struct HitResolver {
    base_chance: i32,
    skill_factor: f64,
    armor_class_factor: f64,
}

impl Default for HitResolver {
    fn default() -> Self {
        Self::new(&HitConstants::default())
    }
}

impl HitResolver {
    pub fn new(constants: &HitConstants) -> Self {
        HitResolver {
            base_chance: constants.base_chance,
            skill_factor: constants.skill_factor,
            armor_class_factor: constants.armor_class_factor,
        }
    }

    /// Chance before the roll: base + weapon accuracy + skill - armor class
    pub fn final_chance(&self, attacker: &Player, weapon: &Weapon, target: &Defense) -> (i32, i32, u32) {
        let skill_modifier = floor_to_u32(attacker.skill(weapon.skill) as f64 * self.skill_factor) as i32;
        let defense_modifier = -(floor_to_u32(target.armor_class as f64 * self.armor_class_factor) as i32);
        let chance = self
            .base_chance
            .saturating_add(weapon.accuracy)
            .saturating_add(skill_modifier)
            .saturating_add(defense_modifier)
            .clamp(0, 100) as u32;
        (skill_modifier, defense_modifier, chance)
    }

    /// Roll a player attack against a defensive profile
    ///
    /// One percentile draw; the attack hits when the draw is at most the
    /// final chance, so 0 never hits and 100 never misses.
    pub fn calculate_hit_chance(
        &self,
        attacker: &Player,
        weapon: &Weapon,
        target: &Defense,
        dice: &mut impl Dice,
    ) -> HitCalculation {
        let (skill_modifier, defense_modifier, final_chance) = self.final_chance(attacker, weapon, target);
        let roll = dice.percentile();
        let is_hit = roll <= final_chance;

        debug!(
            weapon = %weapon.name,
            skill = attacker.skill(weapon.skill),
            final_chance,
            roll,
            is_hit,
            "hit roll"
        );

        HitCalculation {
            base_chance: self.base_chance,
            weapon_modifier: weapon.accuracy,
            skill_modifier,
            defense_modifier,
            final_chance,
            roll,
            is_hit,
        }
    }

    /// Roll against a fixed hit chance, as enemies attack
    pub fn roll_flat(&self, chance: u32, dice: &mut impl Dice) -> HitCalculation {
        let final_chance = chance.min(100);
        let roll = dice.percentile();
        HitCalculation {
            base_chance: final_chance as i32,
            weapon_modifier: 0,
            skill_modifier: 0,
            defense_modifier: 0,
            final_chance,
            roll,
            is_hit: roll <= final_chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RngDice, ScriptedDice};
    use crate::types::{AmmoType, RollRange, SkillType};

    fn pistol() -> Weapon {
        Weapon::new("10mm Pistol", SkillType::SmallGuns, AmmoType::TenMm, RollRange::new(5, 12))
    }

    fn gunner(skill: u8) -> Player {
        Player::new("Wanderer", 30, "10mm Pistol").with_skill(SkillType::SmallGuns, skill)
    }

    #[test]
    fn test_chance_components() {
        let resolver = HitResolver::default();
        let mut dice = ScriptedDice::new([50]);
        let calc = resolver.calculate_hit_chance(&gunner(40), &pistol().with_accuracy(5), &Defense::new(15, 0, 0.0), &mut dice);
        assert_eq!(calc.base_chance, 50);
        assert_eq!(calc.weapon_modifier, 5);
        assert_eq!(calc.skill_modifier, 20);
        assert_eq!(calc.defense_modifier, -15);
        assert_eq!(calc.final_chance, 60);
        assert!(calc.is_hit);
    }

    #[test]
    fn test_higher_skill_never_lowers_chance() {
        let resolver = HitResolver::default();
        let target = Defense::new(20, 0, 0.0);
        let mut last = 0;
        for skill in 0..=100u8 {
            let (_, _, chance) = resolver.final_chance(&gunner(skill), &pistol(), &target);
            assert!(chance >= last);
            last = chance;
        }
    }

    #[test]
    fn test_chance_clamped() {
        let resolver = HitResolver::default();
        let (_, _, high) = resolver.final_chance(&gunner(100), &pistol().with_accuracy(40), &Defense::none());
        assert_eq!(high, 100);
        let (_, _, low) = resolver.final_chance(&gunner(0), &pistol(), &Defense::new(90, 0, 0.0));
        assert_eq!(low, 0);
    }

    #[test]
    fn test_boundary_rolls() {
        let resolver = HitResolver::default();
        assert!(resolver.roll_flat(1, &mut ScriptedDice::new([1])).is_hit);
        assert!(!resolver.roll_flat(0, &mut ScriptedDice::new([1])).is_hit);
        assert!(resolver.roll_flat(100, &mut ScriptedDice::new([100])).is_hit);
        assert!(!resolver.roll_flat(99, &mut ScriptedDice::new([100])).is_hit);
    }

    #[test]
    fn test_zero_chance_never_hits() {
        let resolver = HitResolver::default();
        let mut dice = RngDice::seeded(7);
        for _ in 0..10_000 {
            assert!(!resolver.roll_flat(0, &mut dice).is_hit);
        }
    }

    #[test]
    fn test_full_chance_never_misses() {
        let resolver = HitResolver::default();
        let mut dice = RngDice::seeded(11);
        for _ in 0..10_000 {
            assert!(resolver.roll_flat(100, &mut dice).is_hit);
        }
    }
}
