//! Leveling curve - leaving level L takes `L * xp_per_level` total experience

use super::ExperienceResolver;
use serde::{Deserialize, Serialize};

/// Outcome of a level-up check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub previous_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
}

impl LevelUp {
    pub fn leveled(&self) -> bool {
        self.levels_gained > 0
    }
}

impl ExperienceResolver {
    /// Total experience at which `level` advances to `level + 1`
    pub fn required_experience(&self, level: u32) -> u64 {
        (level as u64).saturating_mul(self.xp_per_level)
    }

    /// Level reached by accumulated experience, computed directly from the curve
    ///
    /// Several levels can be gained at once. The level never goes down.
    pub fn check_level_up(&self, current_level: u32, total_experience: u64) -> LevelUp {
        let previous_level = current_level.max(1);
        let reached = (total_experience / self.xp_per_level).saturating_add(1);
        let level = u32::try_from(reached).unwrap_or(u32::MAX).max(previous_level);

        LevelUp {
            previous_level,
            new_level: level,
            levels_gained: level - previous_level,
        }
    }

    /// Experience still needed to leave `level`
    pub fn experience_to_next_level(&self, level: u32, total_experience: u64) -> u64 {
        self.required_experience(level.max(1))
            .saturating_sub(total_experience)
    }
}
