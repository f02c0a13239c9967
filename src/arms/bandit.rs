use super::arm::Arm;

use crate::errors::BanditError;
use crate::utils::argmax;

use rand::RngCore;
use std::fmt;
use std::sync::Arc;

/// The environment of one problem instance: a fixed, ordered set of arms.
///
/// Expected values and the optimal arm are computed once at construction.
/// The bandit keeps no pull history, that is the job of the algorithms.
#[derive(Debug, Clone)]
pub struct Bandit {
    arms: Vec<Arc<dyn Arm>>,
    expected_rewards: Vec<f64>,
    optimal_arm: usize,
}

impl Bandit {
    pub fn new(arms: Vec<Arc<dyn Arm>>) -> Result<Self, BanditError> {
        let expected_rewards = arms
            .iter()
            .map(|arm| arm.expected_value())
            .collect::<Vec<_>>();
        let optimal_arm = argmax(&expected_rewards)
            .ok_or_else(|| BanditError::invalid("arms", "a bandit needs at least one arm"))?;

        Ok(Self {
            arms,
            expected_rewards,
            optimal_arm,
        })
    }

    pub fn k(&self) -> usize {
        self.arms.len()
    }

    pub fn arms(&self) -> &[Arc<dyn Arm>] {
        &self.arms
    }

    pub fn expected_rewards(&self) -> &[f64] {
        &self.expected_rewards
    }

    pub fn optimal_arm(&self) -> usize {
        self.optimal_arm
    }

    pub fn optimal_value(&self) -> f64 {
        self.expected_rewards[self.optimal_arm]
    }

    pub fn pull_arm(&self, index: usize, rng: &mut dyn RngCore) -> Result<f64, BanditError> {
        self.arms
            .get(index)
            .map(|arm| arm.pull(rng))
            .ok_or(BanditError::IndexOutOfRange {
                index,
                k: self.k(),
            })
    }

    pub fn get_expected_value(&self, index: usize) -> Result<f64, BanditError> {
        self.expected_rewards
            .get(index)
            .copied()
            .ok_or(BanditError::IndexOutOfRange {
                index,
                k: self.k(),
            })
    }
}

impl fmt::Display for Bandit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arms = self
            .arms
            .iter()
            .map(|arm| arm.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Bandit with {} arms: {}", self.k(), arms)
    }
}
