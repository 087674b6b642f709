//! Encounters - a group of enemies fought together, with running stats

use super::result::{AttackDirection, CombatResult};
use crate::catalog::EnemyTemplate;
use crate::combatant::{Combatant, Enemy};
use crate::dice::Dice;
use crate::experience::BonusConditions;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Running totals for one encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncounterStats {
    pub turns: u32,
    /// Player attacks that rolled to hit
    pub attacks_made: u32,
    pub attacks_hit: u32,
    pub criticals: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
}

impl EncounterStats {
    pub fn misses(&self) -> u32 {
        self.attacks_made - self.attacks_hit
    }
}

/// Enemies in one fight, addressed by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub enemies: Vec<Enemy>,
    pub stats: EncounterStats,
}

impl Encounter {
    /// Spawn a group from a template
    ///
    /// Dice draws: the group size, then one title pick per enemy (skipped
    /// when the template has no titles).
    pub fn spawn(template: &EnemyTemplate, dice: &mut impl Dice) -> Self {
        let count = dice.roll_range(template.spawn_count.min, template.spawn_count.max).max(1);
        let enemies: Vec<Enemy> = (0..count).map(|_| Enemy::spawn(template, dice)).collect();
        debug!(template = %template.name, count, "encounter spawned");
        Self::from_enemies(enemies)
    }

    pub fn from_enemies(enemies: Vec<Enemy>) -> Self {
        Encounter {
            enemies,
            stats: EncounterStats::default(),
        }
    }

    pub fn enemy(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index)
    }

    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.enemies.get_mut(index)
    }

    /// Index of the first enemy still standing
    pub fn first_living_index(&self) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_alive()).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.living_count() == 0
    }

    pub fn begin_turn(&mut self) -> u32 {
        self.stats.turns += 1;
        self.stats.turns
    }

    /// Fold one attack result into the running stats
    pub fn record(&mut self, result: &CombatResult) {
        match result.direction {
            AttackDirection::PlayerToEnemy => {
                if !result.attempted() {
                    return;
                }
                self.stats.attacks_made += 1;
                if result.is_hit {
                    self.stats.attacks_hit += 1;
                }
                if result.is_critical {
                    self.stats.criticals += 1;
                }
                self.stats.damage_dealt += result.damage as u64;
            }
            AttackDirection::EnemyToPlayer => {
                self.stats.damage_taken += result.damage as u64;
            }
        }
    }

    /// Bonus conditions for a kill, from the killing blow and the stats so far
    ///
    /// Call after the killing blow has been recorded.
    pub fn bonus_conditions(&self, killing_blow: &CombatResult, speed_kill_turns: u32) -> BonusConditions {
        BonusConditions {
            critical_finish: killing_blow.is_critical,
            perfect_accuracy: self.stats.attacks_made > 0 && self.stats.misses() == 0,
            no_damage_taken: self.stats.damage_taken == 0,
            speed_kill: self.stats.turns <= speed_kill_turns,
        }
    }
}
