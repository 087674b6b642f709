//! Ammo gate - attack legality and ammunition spending
//!
//! An attack must be payable in full: the reserve has to cover every shot
//! of the attack or nothing is fired. Melee weapons bypass the gate.

use crate::catalog::Weapon;
use crate::combatant::Player;
use tracing::debug;

/// Stateless ammo check and consumption
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoGate;

impl AmmoGate {
    pub fn new() -> Self {
        AmmoGate
    }

    /// Whether the combatant can pay for one attack with `weapon`
    pub fn can_use_weapon(&self, combatant: &Player, weapon: &Weapon) -> bool {
        if !weapon.uses_ammo() {
            return true;
        }
        combatant.ammo_count(weapon.ammo) >= weapon.shots_per_attack
    }

    /// Spend the ammo for one attack
    ///
    /// Returns false and leaves the reserve untouched when the attack cannot
    /// be paid for in full. Melee weapons always succeed without spending.
    pub fn consume_ammo(&self, combatant: &mut Player, weapon: &Weapon) -> bool {
        if !weapon.uses_ammo() {
            return true;
        }
        if !self.can_use_weapon(combatant, weapon) {
            debug!(
                weapon = %weapon.name,
                ammo = %weapon.ammo,
                have = combatant.ammo_count(weapon.ammo),
                need = weapon.shots_per_attack,
                "attack rejected: not enough ammo"
            );
            return false;
        }

        let Some(count) = combatant.ammo.get_mut(&weapon.ammo) else {
            return false;
        };
        *count -= weapon.shots_per_attack;
        debug!(
            weapon = %weapon.name,
            ammo = %weapon.ammo,
            remaining = *count,
            "ammo spent"
        );
        true
    }
}
