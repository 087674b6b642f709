//! Combat - hit rolls, attack orchestration and encounter bookkeeping

mod encounter;
mod hit;
pub mod messages;
mod resolution;
mod result;

pub use encounter::{Encounter, EncounterStats};
pub use hit::{HitCalculation, HitResolver};
pub use resolution::{CombatEngine, Exchange, ExperienceAward};
pub use result::{AttackDirection, AttackOutcome, CombatResult};
