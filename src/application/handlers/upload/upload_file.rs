//! UploadFileHandler - Validates and stores an image.
//!
//! Files are content-addressed, so uploading the same image twice yields the
//! same URL and a single stored copy.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::upload::{StoredUpload, UploadError, ValidatedImage};
use crate::ports::FileStorage;

/// 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadFileCommand {
    pub user_id: UserId,
    /// Content type from the multipart part, if the client sent one.
    pub declared_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct UploadFileHandler {
    storage: Arc<dyn FileStorage>,
    max_bytes: usize,
}

impl UploadFileHandler {
    pub fn new(storage: Arc<dyn FileStorage>, max_bytes: usize) -> Self {
        Self { storage, max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn handle(&self, cmd: UploadFileCommand) -> Result<StoredUpload, UploadError> {
        let image = ValidatedImage::new(cmd.declared_type.as_deref(), cmd.bytes, self.max_bytes)?;

        let url = self
            .storage
            .put(&image.key, &image.bytes)
            .await
            .map_err(|e| UploadError::Storage(e.to_string()))?;

        tracing::info!(
            user_id = %cmd.user_id,
            key = %image.key,
            size_bytes = image.size_bytes(),
            "Upload stored"
        );

        Ok(StoredUpload {
            url,
            content_type: image.kind.content_type().to_string(),
            size_bytes: image.size_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryFileStorage;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn command(declared: Option<&str>, bytes: &[u8]) -> UploadFileCommand {
        UploadFileCommand {
            user_id: UserId::new("uploader").unwrap(),
            declared_type: declared.map(str::to_string),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn stores_png_under_content_address() {
        let storage = Arc::new(InMemoryFileStorage::new());
        let handler = UploadFileHandler::new(storage.clone(), 1024);

        let stored = handler.handle(command(Some("image/png"), PNG)).await.unwrap();

        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.url.ends_with(".png"));
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(stored.size_bytes, PNG.len() as u64);
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_upload_reuses_key() {
        let storage = Arc::new(InMemoryFileStorage::new());
        let handler = UploadFileHandler::new(storage.clone(), 1024);

        let first = handler.handle(command(None, PNG)).await.unwrap();
        let second = handler.handle(command(Some("image/png"), PNG)).await.unwrap();

        assert_eq!(first.url, second.url);
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let handler = UploadFileHandler::new(Arc::new(InMemoryFileStorage::new()), 8);

        let result = handler.handle(command(None, PNG)).await;

        assert_eq!(result.unwrap_err(), UploadError::TooLarge { max_bytes: 8 });
    }

    #[tokio::test]
    async fn rejects_mislabelled_content() {
        let storage = Arc::new(InMemoryFileStorage::new());
        let handler = UploadFileHandler::new(storage.clone(), 1024);

        let result = handler.handle(command(Some("image/gif"), PNG)).await;

        assert_eq!(result.unwrap_err(), UploadError::ContentMismatch);
        assert!(storage.is_empty());
    }
}
