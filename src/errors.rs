use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BanditError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Arm {index} out of range for a bandit with {k} arms")]
    IndexOutOfRange { index: usize, k: usize },
    #[error("Shape mismatch: expected {expected} rows, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl BanditError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        BanditError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Cannot read config: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Bandit(#[from] BanditError),
    #[error("Failed to serialize report to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
