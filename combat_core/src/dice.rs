//! Dice - the single source of randomness for every resolver
//!
//! Resolvers never reach for a global generator. They take `&mut impl Dice`,
//! so a battle loop can hand in a seeded generator and a test can hand in a
//! [`ScriptedDice`] that forces exact hit/miss/critical outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform integer source
pub trait Dice {
    /// Uniform integer in `min..=max`. Returns `min` when `max <= min`.
    fn roll_range(&mut self, min: u32, max: u32) -> u32;

    /// Uniform integer in `1..=100`
    fn percentile(&mut self) -> u32 {
        self.roll_range(1, 100)
    }

    /// Uniform index in `0..len` (0 for empty or single-element lists)
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let last = u32::try_from(len - 1).unwrap_or(u32::MAX);
        self.roll_range(0, last) as usize
    }
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        RngDice { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngDice<StdRng> {
    /// Deterministic dice for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        RngDice::new(StdRng::seed_from_u64(seed))
    }

    /// Dice seeded from the OS
    pub fn from_entropy() -> Self {
        RngDice::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn roll_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Replays a fixed sequence of rolls
///
/// Every call consumes exactly one scripted value, clamped into the
/// requested range. Once the script runs out the fallback is used; without
/// a fallback the top of the range is returned, which misses any chance
/// below 100 and never crits.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    fallback: Option<u32>,
    consumed: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        ScriptedDice {
            rolls: rolls.into_iter().collect(),
            fallback: None,
            consumed: 0,
        }
    }

    /// Value used once the script is exhausted
    pub fn with_fallback(mut self, value: u32) -> Self {
        self.fallback = Some(value);
        self
    }

    /// Append more rolls to the end of the script
    pub fn push(&mut self, roll: u32) {
        self.rolls.push_back(roll);
    }

    /// Scripted rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }

    /// Total calls served so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Dice for ScriptedDice {
    fn roll_range(&mut self, min: u32, max: u32) -> u32 {
        let max = max.max(min);
        self.consumed += 1;
        let value = self.rolls.pop_front().or(self.fallback).unwrap_or(max);
        value.clamp(min, max)
    }
}
