use std::path::PathBuf;

use askit_core::FormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Form definition file not found: {0}")]
    DefinitionFileNotFound(PathBuf),

    #[error("Failed to parse form definition: {0}")]
    ParseError(String),

    #[error("Invalid form definition: {0}")]
    InvalidDefinition(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
