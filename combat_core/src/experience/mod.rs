//! Experience - kill rewards and the leveling curve

mod leveling;
mod reward;

pub use leveling::LevelUp;
pub use reward::{BonusConditions, ExperienceCalculation, ExperienceSource};

use crate::config::{BonusConstants, ExperienceConstants};

/// Converts kills into experience and experience into levels
#[derive(Debug, Clone)]
pub struct ExperienceResolver {
    xp_per_level: u64,
    level_penalty: f64,
    difficulty_modifier: f64,
    speed_kill_turns: u32,
    bonuses: BonusConstants,
}

impl Default for ExperienceResolver {
    fn default() -> Self {
        Self::new(&ExperienceConstants::default())
    }
}

impl ExperienceResolver {
    pub fn new(constants: &ExperienceConstants) -> Self {
        ExperienceResolver {
            xp_per_level: constants.xp_per_level.max(1),
            level_penalty: constants.level_penalty,
            difficulty_modifier: constants.difficulty_modifier,
            speed_kill_turns: constants.speed_kill_turns,
            bonuses: constants.bonuses.clone(),
        }
    }

    /// Same resolver with a different difficulty modifier
    pub fn with_difficulty(mut self, difficulty_modifier: f64) -> Self {
        self.difficulty_modifier = difficulty_modifier;
        self
    }

    pub fn difficulty_modifier(&self) -> f64 {
        self.difficulty_modifier
    }

    /// Kills within this many turns count as speed kills
    pub fn speed_kill_turns(&self) -> u32 {
        self.speed_kill_turns
    }

    pub fn bonuses(&self) -> &BonusConstants {
        &self.bonuses
    }
}
