use super::arm::Arm;

use crate::errors::BanditError;

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use std::collections::HashSet;
use std::fmt;

// two decimals
const PRECISION: f64 = 100.0;
const ROUNDING_SLACK: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct GaussianArm {
    mu: f64,
    sigma: f64,
    distribution: Normal<f64>,
}

impl GaussianArm {
    pub fn new(mu: f64, sigma: f64) -> Result<Self, BanditError> {
        if !mu.is_finite() {
            return Err(BanditError::invalid("mu", format!("{mu} is not finite")));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(BanditError::invalid(
                "sigma",
                format!("{sigma} must be positive"),
            ));
        }

        let distribution =
            Normal::new(mu, sigma).map_err(|e| BanditError::invalid("sigma", e.to_string()))?;

        Ok(Self {
            mu,
            sigma,
            distribution,
        })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Builds `k` arms sharing `sigma` whose means are pairwise distinct,
    /// drawn uniformly from `[mu_min, mu_max)` and rounded to two decimals.
    ///
    /// Draws are repeated until `k` distinct rounded means are collected, in
    /// draw order. Rounded values falling outside `[mu_min, mu_max]` are
    /// discarded.
    pub fn generate_arms(
        k: usize,
        mu_min: f64,
        mu_max: f64,
        sigma: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Self>, BanditError> {
        if k == 0 {
            return Err(BanditError::invalid("k", "at least one arm is required"));
        }
        if !(mu_min.is_finite() && mu_max.is_finite()) {
            return Err(BanditError::invalid("mu_min/mu_max", "bounds must be finite"));
        }
        if mu_min >= mu_max {
            return Err(BanditError::invalid(
                "mu_min/mu_max",
                format!("mu_min ({mu_min}) must be lower than mu_max ({mu_max})"),
            ));
        }
        if !(mu_max - mu_min).is_finite() {
            return Err(BanditError::invalid(
                "mu_min/mu_max",
                format!("width of [{mu_min}, {mu_max}] is not finite"),
            ));
        }

        // counted in f64, wide ranges hold more means than any k
        let lowest = (mu_min * PRECISION - ROUNDING_SLACK).ceil();
        let highest = (mu_max * PRECISION + ROUNDING_SLACK).floor();
        let available = (highest - lowest + 1.0).max(0.0);
        if available < k as f64 {
            return Err(BanditError::invalid(
                "k",
                format!("[{mu_min}, {mu_max}] holds {available} distinct means, {k} requested"),
            ));
        }

        let mut seen = HashSet::with_capacity(k);
        let mut means = Vec::with_capacity(k);
        while means.len() < k {
            let mu = round_mean(rng.random_range(mu_min..mu_max));
            if mu < mu_min || mu > mu_max {
                continue;
            }
            if seen.insert(mu.to_bits()) {
                means.push(mu);
            }
        }

        means.into_iter().map(|mu| Self::new(mu, sigma)).collect()
    }
}

// two decimals, or the value itself where cents are beyond f64 range
fn round_mean(mu: f64) -> f64 {
    let cents = mu * PRECISION;
    if cents.is_finite() {
        // + 0.0 folds -0.0 into 0.0
        cents.round() / PRECISION + 0.0
    } else {
        mu
    }
}

impl Arm for GaussianArm {
    fn pull(&self, rng: &mut dyn RngCore) -> f64 {
        self.distribution.sample(rng)
    }

    fn expected_value(&self) -> f64 {
        self.mu
    }
}

impl fmt::Display for GaussianArm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GaussianArm(mu={}, sigma={})", self.mu, self.sigma)
    }
}
