use crate::arms::ArmType;
use crate::policies::AlgorithmType;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct ExperimentConfig {
    pub k: usize,
    pub steps: usize,
    pub runs: usize,
    /// Unset draws the master seed from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    pub parallel: bool,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub experiment: ExperimentConfig,
    pub arms: ArmType,
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<AlgorithmType>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    // the classic 10-armed testbed
    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("logging.log_level", "info")?
            .set_default("experiment.k", 10)?
            .set_default("experiment.steps", 1000)?
            .set_default("experiment.runs", 500)?
            .set_default("experiment.parallel", false)?
            .set_default("arms.type", "Gaussian")?
            .set_default("arms.mu_min", 1.0)?
            .set_default("arms.mu_max", 10.0)?
            .set_default("arms.sigma", 1.0)
    }
}

fn default_algorithms() -> Vec<AlgorithmType> {
    [0.0, 0.01, 0.1]
        .into_iter()
        .map(|epsilon| AlgorithmType::EpsilonGreedy { epsilon })
        .collect()
}
