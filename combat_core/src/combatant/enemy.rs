//! Enemy instances spawned from templates

use super::Combatant;
use crate::catalog::{ArmorCatalog, AttackProfile, EnemyTemplate};
use crate::dice::Dice;
use crate::types::{Defense, EnemyKind};
use serde::{Deserialize, Serialize};

/// A live enemy inside one encounter
///
/// Identified by its position in the encounter, not by a global id. Health
/// only ever goes down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Template this instance was spawned from
    pub template: String,
    /// Display title
    pub name: String,
    pub kind: EnemyKind,
    pub max_level: u32,
    pub max_health: u32,
    pub health: u32,
    pub defense: Defense,
    pub attack: AttackProfile,
    /// Base experience for the kill
    pub experience: u32,
}

impl Enemy {
    /// Instantiate at full health with an explicit title
    pub fn from_template(template: &EnemyTemplate, title: Option<&str>) -> Self {
        Enemy {
            template: template.name.clone(),
            name: title.unwrap_or(template.name.as_str()).to_string(),
            kind: template.kind,
            max_level: template.max_level,
            max_health: template.defense.health,
            health: template.defense.health,
            defense: template.defense.defense(),
            attack: template.attack.clone(),
            experience: template.experience,
        }
    }

    /// Instantiate with a title variant picked by the dice
    pub fn spawn(template: &EnemyTemplate, dice: &mut impl Dice) -> Self {
        let title = if template.titles.is_empty() {
            None
        } else {
            let index = dice.pick(template.titles.len());
            template.titles.get(index).map(String::as_str)
        };
        Self::from_template(template, title)
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

impl Combatant for Enemy {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        self.max_health
    }

    fn defense(&self, _armor: &ArmorCatalog) -> Defense {
        self.defense
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }
}
