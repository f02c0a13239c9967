use super::epsilon_greedy::EpsilonGreedy;

use crate::errors::BanditError;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-arm pull counts and sample-average value estimates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimates {
    counts: Vec<u64>,
    values: Vec<f64>,
}

impl Estimates {
    pub fn new(k: usize) -> Self {
        Self {
            counts: vec![0; k],
            values: vec![0.0; k],
        }
    }

    pub fn k(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Incremental sample average: `value += (reward - value) / n`.
    pub fn update(&mut self, arm: usize, reward: f64) -> Result<(), BanditError> {
        let k = self.k();
        let (count, value) = self
            .counts
            .get_mut(arm)
            .zip(self.values.get_mut(arm))
            .ok_or(BanditError::IndexOutOfRange { index: arm, k })?;

        *count += 1;
        *value += (reward - *value) / (*count as f64);

        Ok(())
    }

    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|count| *count = 0);
        self.values.iter_mut().for_each(|value| *value = 0.0);
    }
}

/// Describes an algorithm independently of its learned state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AlgorithmType {
    EpsilonGreedy { epsilon: f64 },
}

impl AlgorithmType {
    pub fn into_inner(self, k: usize) -> Result<Box<dyn Algorithm>, BanditError> {
        match self {
            AlgorithmType::EpsilonGreedy { epsilon } => {
                Ok(Box::new(EpsilonGreedy::new(k, epsilon)?))
            }
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlgorithmType::EpsilonGreedy { epsilon } => {
                write!(f, "EpsilonGreedy (epsilon={epsilon})")
            }
        }
    }
}

/// An arm-selection policy learning from the sample averages of its rewards.
///
/// Implementors only decide how to pick an arm, learning goes through the
/// shared [`Estimates`].
pub trait Algorithm: Send + fmt::Debug {
    fn algorithm_type(&self) -> AlgorithmType;
    fn estimates(&self) -> &Estimates;
    fn estimates_mut(&mut self) -> &mut Estimates;
    fn select_arm(&self, rng: &mut dyn RngCore) -> usize;

    fn k(&self) -> usize {
        self.estimates().k()
    }

    fn counts(&self) -> &[u64] {
        self.estimates().counts()
    }

    fn values(&self) -> &[f64] {
        self.estimates().values()
    }

    fn label(&self) -> String {
        self.algorithm_type().to_string()
    }

    fn update(&mut self, chosen_arm: usize, reward: f64) -> Result<(), BanditError> {
        self.estimates_mut().update(chosen_arm, reward)
    }

    fn reset(&mut self) {
        self.estimates_mut().reset()
    }
}
