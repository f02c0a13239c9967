//! Stochastic k-armed bandit testbed.
//!
//! Arms and the [`arms::Bandit`] environment generate rewards, the
//! [`policies::Algorithm`] implementations learn sample-average estimates of
//! them, and [`experiment`] averages many independent runs into per-step
//! reward and optimal-selection curves.

pub mod arms;
pub mod config;
pub mod errors;
pub mod experiment;
pub mod policies;
pub mod report;
mod utils;

pub use arms::{Arm, ArmType, Bandit, GaussianArm};
pub use errors::BanditError;
pub use experiment::{run_experiment, run_experiment_parallel, ArmStats, ExperimentResults};
pub use policies::{Algorithm, AlgorithmType, EpsilonGreedy, MaybeSeededRng};
