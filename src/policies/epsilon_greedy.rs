use super::policy::{Algorithm, AlgorithmType, Estimates};

use crate::errors::BanditError;
use crate::utils::argmax;

use rand::{Rng, RngCore};

#[derive(Clone, Debug)]
pub struct EpsilonGreedy {
    estimates: Estimates,
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(k: usize, epsilon: f64) -> Result<Self, BanditError> {
        if k == 0 {
            return Err(BanditError::invalid("k", "at least one arm is required"));
        }
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(BanditError::invalid(
                "epsilon",
                format!("{epsilon} is not in [0, 1]"),
            ));
        }

        Ok(Self {
            estimates: Estimates::new(k),
            epsilon,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Algorithm for EpsilonGreedy {
    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::EpsilonGreedy {
            epsilon: self.epsilon,
        }
    }

    fn estimates(&self) -> &Estimates {
        &self.estimates
    }

    fn estimates_mut(&mut self) -> &mut Estimates {
        &mut self.estimates
    }

    fn select_arm(&self, rng: &mut dyn RngCore) -> usize {
        // exploration may land on the current best arm as well
        if rng.random::<f64>() < self.epsilon {
            rng.random_range(0..self.k())
        } else {
            argmax(self.estimates.values()).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    const SEED: u64 = 1234;

    #[test]
    fn create_policy() {
        let policy = EpsilonGreedy::new(5, 0.15).unwrap();
        assert_eq!(policy.k(), 5);
        assert_eq!(policy.epsilon(), 0.15);
        assert_eq!(policy.counts(), &[0; 5]);
        assert_eq!(policy.values(), &[0.0; 5]);
    }

    #[test]
    fn create_invalid() {
        assert!(matches!(
            EpsilonGreedy::new(5, -0.01),
            Err(BanditError::InvalidParameter {
                name: "epsilon",
                ..
            })
        ));
        assert!(EpsilonGreedy::new(5, 1.01).is_err());
        assert!(EpsilonGreedy::new(5, f64::NAN).is_err());
        assert!(EpsilonGreedy::new(0, 0.1).is_err());
        assert!(EpsilonGreedy::new(1, 0.0).is_ok());
        assert!(EpsilonGreedy::new(1, 1.0).is_ok());
    }

    #[test]
    fn draw_best() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = EpsilonGreedy::new(3, 0.0).unwrap();
        policy.update(2, 1.0).unwrap();
        policy.update(0, 0.5).unwrap();

        for _ in 0..100 {
            assert_eq!(policy.select_arm(&mut rng), 2);
        }
    }

    #[test]
    fn draw_best_ties_to_lowest_index() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = EpsilonGreedy::new(4, 0.0).unwrap();
        assert_eq!(policy.select_arm(&mut rng), 0);

        policy.update(1, 2.0).unwrap();
        policy.update(3, 2.0).unwrap();
        for _ in 0..100 {
            assert_eq!(policy.select_arm(&mut rng), 1);
        }
    }

    #[test]
    fn draw_uniform() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = EpsilonGreedy::new(10, 1.0).unwrap();
        // a clear favourite must not bias exploration
        policy.update(7, 100.0).unwrap();

        let trials = 100_000;
        let mut frequencies = [0usize; 10];
        (0..trials).for_each(|_| frequencies[policy.select_arm(&mut rng)] += 1);

        frequencies.iter().for_each(|&count| {
            let frequency = count as f64 / trials as f64;
            assert!(
                (frequency - 0.1).abs() < 0.01,
                "frequency {frequency} too far from uniform"
            );
        });
    }

    #[test]
    fn draw_mostly_greedy() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = EpsilonGreedy::new(5, 0.1).unwrap();
        policy.update(3, 1.0).unwrap();

        let trials = 50_000;
        let greedy = (0..trials)
            .filter(|_| policy.select_arm(&mut rng) == 3)
            .count() as f64
            / trials as f64;
        // 0.9 exploiting + 0.1 / 5 exploring
        assert!((greedy - 0.92).abs() < 0.01, "greedy share {greedy}");
    }

    #[test]
    fn update() {
        let mut policy = EpsilonGreedy::new(2, 0.0).unwrap();
        assert!(policy.update(0, 1.0).is_ok());
        assert_eq!(policy.values(), &[1.0, 0.0]);
        assert_eq!(policy.counts(), &[1, 0]);
        assert!(policy.update(2, 1.0).is_err());
    }

    #[test]
    fn reset() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = EpsilonGreedy::new(3, 0.0).unwrap();
        policy.update(2, 5.0).unwrap();
        assert_eq!(policy.select_arm(&mut rng), 2);

        policy.reset();
        assert_eq!(policy.counts(), &[0; 3]);
        assert_eq!(policy.values(), &[0.0; 3]);
        assert_eq!(policy.select_arm(&mut rng), 0);
        assert_eq!(policy.epsilon(), 0.0);
    }
}
