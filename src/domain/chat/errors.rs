//! Chat-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        ChatError::Infrastructure(err.to_string())
    }
}
