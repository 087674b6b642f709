//! combat_sim - Headless encounter simulator for combat_core
//!
//! Plays the part of the battle loop: spawns encounters, serializes player
//! and enemy turns, hands out experience on kills and reports the totals.

pub mod simulation;

pub use simulation::{EncounterReport, SimError, SimulationConfig, SimulationReport};
