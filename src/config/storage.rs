//! Upload storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

const MAX_ALLOWED_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded files are written to
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// URL prefix the directory is served under
    #[serde(default = "default_public_path")]
    pub public_path: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_upload_bytes == 0 || self.max_upload_bytes > MAX_ALLOWED_UPLOAD_BYTES {
            return Err(ValidationError::InvalidUploadLimit);
        }
        if !self.public_path.starts_with('/') || self.public_path.len() < 2 {
            return Err(ValidationError::InvalidPublicPath);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            public_path: default_public_path(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    crate::application::upload::DEFAULT_MAX_UPLOAD_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.public_path, "/uploads");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_upload_limit_bounds() {
        let config = StorageConfig {
            max_upload_bytes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUploadLimit));
    }

    #[test]
    fn test_public_path_must_be_absolute() {
        let config = StorageConfig {
            public_path: "uploads".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPublicPath));
    }
}
