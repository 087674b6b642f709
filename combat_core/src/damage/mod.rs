//! Damage system - critical rolls and the damage pipeline

mod calculation;
mod critical;

pub use calculation::{DamageCalculation, DamageResolver};
pub use critical::{CriticalCalculation, CriticalModifiers, CriticalResolver};
