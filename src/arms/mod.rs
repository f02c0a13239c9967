mod arm;
mod bandit;
mod gaussian;

pub use arm::Arm;
pub use bandit::Bandit;
pub use gaussian::GaussianArm;

use crate::errors::BanditError;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Describes how to generate the arms of a bandit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArmType {
    Gaussian { mu_min: f64, mu_max: f64, sigma: f64 },
}

impl ArmType {
    pub fn generate(
        self,
        k: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Arc<dyn Arm>>, BanditError> {
        match self {
            ArmType::Gaussian {
                mu_min,
                mu_max,
                sigma,
            } => Ok(GaussianArm::generate_arms(k, mu_min, mu_max, sigma, rng)?
                .into_iter()
                .map(|arm| Arc::new(arm) as Arc<dyn Arm>)
                .collect()),
        }
    }
}

impl Default for ArmType {
    fn default() -> Self {
        ArmType::Gaussian {
            mu_min: 1.0,
            mu_max: 10.0,
            sigma: 1.0,
        }
    }
}
