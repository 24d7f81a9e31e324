//! Simulation randomness.
//!
//! Every random draw in the simulation goes through this resource so a test can
//! swap in a seeded generator and get a reproducible session.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Resource, Debug, Clone)]
pub struct SimRng(StdRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }

    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        self.unit() < probability
    }

    /// Uniform angle in `[0, TAU)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.unit() * TAU
    }

    /// Uniform integer in `[0, bound)`; zero when `bound == 0`.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.0.random_range(0..bound)
    }

    /// `amount` distinct indices from `0..len`, without replacement.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount.min(len)).into_vec()
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
