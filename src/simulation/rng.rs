//! Random source shared by the spawner and the vehicles

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;

/// Optionally seeded RNG for reproducible simulations
#[derive(Debug, Clone, Default)]
pub struct SimRng {
    seeded: Option<StdRng>,
}

impl SimRng {
    /// Draw from the thread-local generator
    pub fn unseeded() -> Self {
        Self { seeded: None }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            seeded: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform value in `[0, 1)`
    pub fn unit(&mut self) -> f32 {
        match &mut self.seeded {
            Some(rng) => rng.random::<f32>(),
            None => rand::rng().random::<f32>(),
        }
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        match &mut self.seeded {
            Some(rng) => slice.choose(rng),
            None => slice.choose(&mut rand::rng()),
        }
    }
}
