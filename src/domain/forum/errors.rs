//! Forum-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, PostId, ReplyId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForumError {
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Reply not found: {0}")]
    ReplyNotFound(ReplyId),

    #[error("Only the author can do that")]
    Forbidden,

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ForumError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ForumError::PostNotFound(_) => ErrorCode::PostNotFound,
            ForumError::ReplyNotFound(_) => ErrorCode::ReplyNotFound,
            ForumError::Forbidden => ErrorCode::Forbidden,
            ForumError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ForumError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for ForumError {
    fn from(err: ValidationError) -> Self {
        ForumError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ForumError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ForumError::Forbidden,
            _ => ForumError::Infrastructure(err.to_string()),
        }
    }
}
