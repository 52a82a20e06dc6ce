// src/terrain/seed.rs
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Resolves the configured seed into the world seed used for one pass.
pub struct SeedGenerator {
    rng: ChaCha8Rng,
}

impl SeedGenerator {
    // Auto-seeds drawn from here differ between runs
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    // Reproducible auto-seeds, for tooling and tests
    pub fn seeded(state: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(state),
        }
    }

    /// Returns `configured` unchanged, or a uniformly drawn `u32` when it is 0.
    pub fn resolve_seed(&mut self, configured: u32) -> u32 {
        if configured != 0 {
            return configured;
        }

        let seed = self.rng.random::<u32>();
        log::debug!("SeedGenerator: configured seed is 0, drew {}", seed);
        seed
    }
}

impl Default for SeedGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn explicit_seed_is_returned_unchanged() {
        let mut seeds = SeedGenerator::from_entropy();
        for _ in 0..10 {
            assert_eq!(seeds.resolve_seed(42), 42);
        }
        assert_eq!(seeds.resolve_seed(u32::MAX), u32::MAX);
    }

    #[test]
    fn auto_seed_varies_between_calls() {
        let mut seeds = SeedGenerator::from_entropy();
        let drawn: HashSet<u32> = (0..16).map(|_| seeds.resolve_seed(0)).collect();
        // 16 draws from 2^32 values colliding down to one is not a realistic outcome
        assert!(drawn.len() > 1);
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let mut a = SeedGenerator::seeded(7);
        let mut b = SeedGenerator::seeded(7);
        for _ in 0..5 {
            assert_eq!(a.resolve_seed(0), b.resolve_seed(0));
        }
    }
}
