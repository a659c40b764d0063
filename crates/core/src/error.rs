use crate::loyalty::ConfigField;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// User-facing validation failures raised by the points engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Base amount must be greater than zero")]
    ZeroBaseAmount,

    #[error("Online and normal rates are both zero; the target cannot be reached")]
    ZeroRates,

    #[error("{0} is empty; enter a value before calculating")]
    UnsetField(ConfigField),
}

/// Why a persisted configuration record could not be restored.
/// Always recovered by falling back to defaults.
#[derive(Error, Debug)]
pub enum PersistenceDecodeError {
    #[error("no configuration stored under key '{0}'")]
    Missing(String),

    #[error("stored configuration is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stored configuration is missing field '{0}'")]
    MissingField(&'static str),

    #[error("stored field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("persistence read failed: {0}")]
    Store(#[from] StoreError),
}

/// Failures of the key-value persistence service itself.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(String),
}
