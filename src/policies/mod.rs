mod epsilon_greedy;
mod policy;
mod rng;

pub use epsilon_greedy::EpsilonGreedy;
pub use policy::{Algorithm, AlgorithmType, Estimates};
pub use rng::MaybeSeededRng;
