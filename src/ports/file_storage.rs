//! FileStorage port for user-uploaded files.

use async_trait::async_trait;

/// Errors that can occur during file storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(err.to_string()),
            _ => StorageError::Io(err.to_string()),
        }
    }
}

/// Content-addressed blob storage.
///
/// Keys are flat file names (`<sha256>.<ext>`). Writing an existing key is
/// a no-op since identical keys imply identical content.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the bytes under `key` and returns the public URL.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Public URL for a key, whether or not it exists.
    fn public_url(&self, key: &str) -> String;
}

/// Rejects keys that could escape the storage root.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
