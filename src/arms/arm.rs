use rand::RngCore;
use std::fmt;

/// A reward-generating action of a bandit.
///
/// Arms are immutable once built and shared between every environment of an
/// experiment, hence the `Send + Sync` bound.
pub trait Arm: fmt::Debug + fmt::Display + Send + Sync {
    /// Draws one reward from the arm's distribution.
    fn pull(&self, rng: &mut dyn RngCore) -> f64;

    /// True mean of the reward distribution.
    fn expected_value(&self) -> f64;
}
