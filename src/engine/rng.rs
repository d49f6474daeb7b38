//! Deterministic random array generation.
//!
//! Uses PCG (Permuted Congruential Generator) seeded from a single `u64`,
//! so any array shown on screen can be regenerated from its seed.
//!
//! # Reproducibility Guarantee
//!
//! Given the same seed and value range, `generate` returns bitwise-identical
//! arrays across runs and platforms.

use rand::prelude::*;
use rand_pcg::Pcg64;
use std::ops::RangeInclusive;

use crate::engine::Value;

/// Lowest value drawn by default.
pub const DEFAULT_MIN_VALUE: Value = 10;

/// Highest value drawn by default (inclusive).
pub const DEFAULT_MAX_VALUE: Value = 409;

/// Seeded generator of bar heights.
#[derive(Debug, Clone)]
pub struct ArrayGenerator {
    /// Seed the generator was created from.
    seed: u64,
    /// Inclusive range of drawn values.
    range: RangeInclusive<Value>,
    /// Internal PCG state.
    rng: Pcg64,
}

impl ArrayGenerator {
    /// Create a generator over the default range `10..=409`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_range(seed, DEFAULT_MIN_VALUE..=DEFAULT_MAX_VALUE)
    }

    /// Create a generator over a custom inclusive range.
    ///
    /// An inverted range is normalized so that `min <= max`.
    #[must_use]
    pub fn with_range(seed: u64, range: RangeInclusive<Value>) -> Self {
        let (lo, hi) = range.into_inner();
        let range = if lo <= hi { lo..=hi } else { hi..=lo };
        Self {
            seed,
            range,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw `size` independent values from the range.
    ///
    /// Values are not required to be unique.
    pub fn generate(&mut self, size: usize) -> Vec<Value> {
        let range = self.range.clone();
        (0..size).map(|_| self.rng.gen_range(range.clone())).collect()
    }

    /// Shuffle `values` in place from the same stream.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}
