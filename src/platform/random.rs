//! Seeded random generator

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::RandomGenerator;

/// PCG32-backed generator; the same seed replays the same spawns
#[derive(Debug, Clone)]
pub struct PcgGenerator {
    seed: u64,
    rng: Pcg32,
}

impl PcgGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomGenerator for PcgGenerator {
    fn probability(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn double_in_range(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}
