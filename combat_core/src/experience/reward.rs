//! Kill rewards - level-difference scaling and bonus multipliers

use super::ExperienceResolver;
use crate::catalog::EnemyTemplate;
use crate::combatant::Enemy;
use crate::types::floor_to_u32;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Anything that pays out experience when defeated
pub trait ExperienceSource {
    fn base_experience(&self) -> u32;
    fn max_level(&self) -> u32;
}

impl ExperienceSource for Enemy {
    fn base_experience(&self) -> u32 {
        self.experience
    }

    fn max_level(&self) -> u32 {
        self.max_level
    }
}

impl ExperienceSource for EnemyTemplate {
    fn base_experience(&self) -> u32 {
        self.experience
    }

    fn max_level(&self) -> u32 {
        self.max_level
    }
}

/// Breakdown of one experience award
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceCalculation {
    pub base_experience: u32,
    pub player_level: u32,
    pub enemy_level: u32,
    /// Player level minus enemy max level; negative against tougher enemies
    pub level_difference: i64,
    pub level_modifier: f64,
    pub difficulty_modifier: f64,
    /// Always at least 1
    pub final_experience: u32,
}

/// Conditions that stack flat bonuses onto a kill reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BonusConditions {
    /// The killing blow was a critical hit
    pub critical_finish: bool,
    /// Every player attack in the encounter connected
    pub perfect_accuracy: bool,
    pub no_damage_taken: bool,
    pub speed_kill: bool,
}

impl ExperienceResolver {
    /// Experience for defeating `enemy` at `player_level`
    ///
    /// `level_modifier = max(0, 1 - penalty * (player_level - enemy_level))`,
    /// reaching 0 at a ten level gap with the default penalty. The result is
    /// floored and never below 1.
    pub fn calculate_experience_gain(
        &self,
        enemy: &impl ExperienceSource,
        player_level: u32,
    ) -> ExperienceCalculation {
        let base_experience = enemy.base_experience();
        let enemy_level = enemy.max_level();
        let level_difference = player_level as i64 - enemy_level as i64;
        let level_modifier = (1.0 - self.level_penalty * level_difference as f64).max(0.0);
        let scaled = base_experience as f64 * level_modifier * self.difficulty_modifier;
        let final_experience = floor_to_u32(scaled).max(1);

        debug!(
            base = base_experience,
            level_difference,
            level_modifier,
            final_experience,
            "experience calculated"
        );

        ExperienceCalculation {
            base_experience,
            player_level,
            enemy_level,
            level_difference,
            level_modifier,
            difficulty_modifier: self.difficulty_modifier,
            final_experience,
        }
    }

    /// 1.0 plus every satisfied bonus, stacked additively
    pub fn bonus_multiplier(&self, conditions: &BonusConditions) -> f64 {
        let mut multiplier = 1.0;
        if conditions.critical_finish {
            multiplier += self.bonuses.critical_finish;
        }
        if conditions.perfect_accuracy {
            multiplier += self.bonuses.perfect_accuracy;
        }
        if conditions.no_damage_taken {
            multiplier += self.bonuses.no_damage_taken;
        }
        if conditions.speed_kill {
            multiplier += self.bonuses.speed_kill;
        }
        multiplier
    }

    /// Scale a base reward by the bonus multiplier, never below 1
    pub fn apply_bonus(&self, experience: u32, conditions: &BonusConditions) -> u32 {
        floor_to_u32(experience as f64 * self.bonus_multiplier(conditions)).max(1)
    }
}
