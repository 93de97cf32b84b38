//! Sources of uniform samples for the trait rules.
//!
//! Every invocation owns its source; nothing here is shared between births.
//! Production code uses [`RngDraws`], tests script the exact samples with
//! [`ScriptedDraws`].

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Yields samples in `[0, 1)`, one per evaluated rule.
pub trait DrawSource: Send {
    fn next_sample(&mut self) -> f64;
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDraws<R> {
    rng: R,
}

impl<R: Rng + Send> RngDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDraws<StdRng> {
    /// A fresh generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> DrawSource for RngDraws<R> {
    fn next_sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Sample returned once a script is exhausted; above every catalog probability.
pub const SCRIPT_FALLBACK: f64 = 0.99;

/// A fixed sequence of samples followed by a constant.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    queue: VecDeque<f64>,
    fallback: f64,
    drawn: usize,
}

impl ScriptedDraws {
    /// Return `samples` in order, then [`SCRIPT_FALLBACK`] forever.
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: samples.into_iter().collect(),
            fallback: SCRIPT_FALLBACK,
            drawn: 0,
        }
    }

    /// Return `sample` for every draw.
    pub fn constant(sample: f64) -> Self {
        Self::new(Vec::new()).then_constant(sample)
    }

    /// Replace the value returned after the script runs out.
    pub fn then_constant(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// How many samples have been handed out.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl DrawSource for ScriptedDraws {
    fn next_sample(&mut self) -> f64 {
        self.drawn += 1;
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
