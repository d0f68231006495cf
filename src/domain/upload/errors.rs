//! Upload-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Multipart field 'file' is required")]
    MissingFile,

    #[error("Uploaded file is empty")]
    Empty,

    #[error("Uploaded file exceeds {max_bytes} bytes")]
    TooLarge { max_bytes: usize },

    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("File content does not match an accepted image format")]
    ContentMismatch,

    #[error("Malformed upload: {0}")]
    Malformed(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl UploadError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UploadError::Storage(_) => ErrorCode::StorageError,
            _ => ErrorCode::ValidationFailed,
        }
    }
}

impl From<DomainError> for UploadError {
    fn from(err: DomainError) -> Self {
        UploadError::Storage(err.to_string())
    }
}
