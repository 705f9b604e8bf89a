//! Pluggable uniform random source
//!
//! Corridor generation only ever needs uniform samples in [0, 1). Any
//! `rand::Rng` qualifies; tests can pin the sequence with [`FixedSequence`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::GAP_SCALE;

/// Source of uniform samples in [0, 1)
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform sample in [-1, 1)
    fn next_signed(&mut self) -> f32 {
        self.next_unit() * 2.0 - 1.0
    }
}

impl<R: Rng> UniformSource for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Production source: PCG seeded from OS entropy, seed kept for logs/replays
pub fn entropy_source() -> (u64, Pcg32) {
    let seed: u64 = rand::random();
    (seed, seeded_source(seed))
}

/// Reproducible source for a known seed
pub fn seeded_source(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Cycles through a fixed list of samples (test stub)
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f32>,
    index: usize,
}

impl FixedSequence {
    /// Values are clamped into [0, 1); an empty list behaves like `[0.5]`
    pub fn new(mut values: Vec<f32>) -> Self {
        if values.is_empty() {
            values.push(0.5);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 1.0 - f32::EPSILON);
        }
        Self { values, index: 0 }
    }

    /// The same sample forever
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl UniformSource for FixedSequence {
    fn next_unit(&mut self) -> f32 {
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v
    }
}

/// Random value whose spread widens with `progress`
///
/// At `progress = 0` the result is exactly 1; at `progress = 1` it is uniform in
/// `[1 - scale, 1)`. `scale < 1` keeps it strictly positive.
pub fn increasing_rand<S: UniformSource + ?Sized>(rng: &mut S, progress: f32, scale: f32) -> f32 {
    scale * (rng.next_unit() * progress + (1.0 - progress)) + (1.0 - scale)
}

/// [`increasing_rand`] with the default gap scale
pub fn increasing_rand_default<S: UniformSource + ?Sized>(rng: &mut S, progress: f32) -> f32 {
    increasing_rand(rng, progress, GAP_SCALE)
}
