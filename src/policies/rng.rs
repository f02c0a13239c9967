use rand::{rngs::SmallRng, SeedableRng};

/// Random source of an experiment, reproducible when a seed is given.
#[derive(Debug, Clone)]
pub struct MaybeSeededRng {
    seed: Option<u64>,
    rng: SmallRng,
}

impl MaybeSeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
