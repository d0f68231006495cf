//! Journal-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, JournalEntryId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    #[error("Journal entry not found: {0}")]
    NotFound(JournalEntryId),

    #[error("Permission denied")]
    Forbidden,

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl From<ValidationError> for JournalError {
    fn from(err: ValidationError) -> Self {
        JournalError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for JournalError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => JournalError::Forbidden,
            _ => JournalError::Infrastructure(err.to_string()),
        }
    }
}
