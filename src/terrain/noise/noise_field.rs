// src/terrain/noise/noise_field.rs
use noise::{NoiseFn, Perlin};

const LACUNARITY: f64 = 2.0;
const PERSISTENCE: f64 = 0.5;

/// Seeded fractal Perlin sampler returning heights in [0, 1].
///
/// Built once per generation pass and shared read-only by every chunk task.
/// The only state is the permutation table derived from the seed, so equal
/// `(seed, x, y, octaves)` always give equal output.
#[derive(Clone)]
pub struct NoiseField {
    seed: u32,
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sums `octaves` layers of Perlin noise, each at double the frequency and
    /// half the amplitude of the last, then maps the result into [0, 1].
    ///
    /// Callers pass coordinates already divided by `extent / frequency`.
    pub fn sample(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let octaves = octaves.max(1);

        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut value = 0.0;
        let mut weight = 0.0;

        for _ in 0..octaves {
            value += self.perlin.get([x * frequency, y * frequency]) * amplitude;
            weight += amplitude;
            amplitude *= PERSISTENCE;
            frequency *= LACUNARITY;
        }

        (value / weight * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}
