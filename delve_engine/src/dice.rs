//! Random sources for combat resolution.
//!
//! Every roll the combat engine makes comes from a [`Dice`] handed to it by
//! the caller, so a seeded or scripted source reproduces a fight exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait Dice {
    fn unit(&mut self) -> f64;
}

/// `StdRng`-backed dice.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Dice for SeededDice {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// An empty sequence always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn unit(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}
