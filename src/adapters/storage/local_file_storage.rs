//! Disk-backed file storage.
//!
//! Files land flat under one directory that the HTTP layer also serves as
//! static content, so the returned URL is `<public_path>/<key>`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{validate_key, FileStorage, StorageError};

#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_path: String,
}

impl LocalFileStorage {
    /// # Example
    /// ```ignore
    /// let storage = LocalFileStorage::new("./data/uploads", "/uploads");
    /// ```
    pub fn new<P: AsRef<Path>>(root: P, public_path: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            public_path: public_path.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError> {
        validate_key(key)?;
        fs::create_dir_all(&self.root).await?;

        let path = self.file_path(key);
        if fs::try_exists(&path).await? {
            return Ok(self.public_url(key));
        }

        // Write to a temp name first so readers never see a partial file.
        let tmp = self.root.join(format!(".{}.partial", key));
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;

        tracing::debug!(key, size = bytes.len(), "Stored upload");
        Ok(self.public_url(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_path.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn put_writes_file_and_returns_url() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"), "/uploads/");

        let url = storage.put("abc.png", b"png-bytes").await.unwrap();

        assert_eq!(url, "/uploads/abc.png");
        let written = std::fs::read(dir.path().join("uploads/abc.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn put_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/uploads");

        storage.put("same.gif", b"one").await.unwrap();
        storage.put("same.gif", b"one").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn put_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/uploads");

        let err = storage.put("../escape.png", b"x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
