//! In-memory file storage for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{validate_key, FileStorage, StorageError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError> {
        validate_key(key)?;
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(key.to_string())
            .or_insert_with(|| bytes.to_vec());
        Ok(self.public_url(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("/uploads/{}", key)
    }
}
