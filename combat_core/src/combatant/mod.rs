//! Combatants - the mutable side of a fight
//!
//! Health and ammo live here, owned by each combatant. The engine mutates
//! them only through the orchestrator step that currently holds the turn.

mod enemy;
mod player;

pub use enemy::Enemy;
pub use player::{Player, PlayerError};

use crate::catalog::ArmorCatalog;
use crate::types::Defense;

/// Anything that can be targeted by an attack
pub trait Combatant {
    /// Name used in combat messages
    fn display_name(&self) -> &str;

    fn health(&self) -> u32;

    fn max_health(&self) -> u32;

    /// Defensive profile; players resolve theirs through the armor catalog
    fn defense(&self, armor: &ArmorCatalog) -> Defense;

    /// Subtract damage, clamping at 0. Returns remaining health.
    fn take_damage(&mut self, amount: u32) -> u32;

    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}
