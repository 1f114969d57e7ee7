//! Hiera Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HieraError {
    /// A required record field was empty. Carries the field name.
    #[error("empty {0}")]
    EmptyField(&'static str),

    #[error("Invalid record name: {0}")]
    InvalidName(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl HieraError {
    /// True for errors caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, HieraError::EmptyField(_) | HieraError::InvalidName(_))
    }
}
