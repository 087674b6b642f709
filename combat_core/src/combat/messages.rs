//! Player-facing combat text

use crate::types::AmmoType;

pub fn player_hit(target: &str, damage: u32) -> String {
    format!("You hit the {} for {} damage.", target, damage)
}

pub fn player_critical(target: &str, damage: u32) -> String {
    format!("Critical hit! You strike the {} for {} damage.", target, damage)
}

pub fn player_miss(target: &str) -> String {
    format!("You miss the {}.", target)
}

pub fn out_of_ammo(weapon: &str, ammo: AmmoType) -> String {
    format!("Out of {} ammo! The {} clicks empty.", ammo, weapon)
}

pub fn unknown_weapon(weapon: &str) -> String {
    format!("You reach for the {}, but there is no such weapon.", weapon)
}

/// One line for the whole attack, however many shots it fired
pub fn enemy_hit(attacker: &str, damage: u32, hits: u32, shots: u32) -> String {
    if shots > 1 {
        format!(
            "The {} hits you {} of {} times for {} damage.",
            attacker, hits, shots, damage
        )
    } else {
        format!("The {} hits you for {} damage.", attacker, damage)
    }
}

pub fn enemy_miss(attacker: &str) -> String {
    format!("The {} misses you.", attacker)
}

pub fn enemy_unknown_weapon(attacker: &str, weapon: &str) -> String {
    format!("The {} reaches for a {} it does not have.", attacker, weapon)
}

pub fn killed(message: &str, target: &str) -> String {
    format!("{} The {} is dead.", message, target)
}

pub fn player_died(message: &str) -> String {
    format!("{} You are dead.", message)
}

pub fn experience_gained(amount: u32) -> String {
    format!("You gain {} experience.", amount)
}

pub fn level_up(message: &str, level: u32) -> String {
    format!("{} You reached level {}!", message, level)
}
