//! Seedable random source for spawn headings and drone variants.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// When a seed is provided the same seed always produces the same wave.
/// Without one, system entropy is used.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Uniform heading in `[0, 2π)` radians.
    pub fn heading(&mut self) -> f32 {
        self.rng.gen_range(0.0..std::f32::consts::TAU)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
