use askit::{ConfigError, FormError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    FormError(#[from] FormError),

    #[error("Failed to serialize answers: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
