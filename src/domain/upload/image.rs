//! Rules for user-uploaded images.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::errors::UploadError;

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/gif" => Some(ImageKind::Gif),
            "image/webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    /// Detects the format from the leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageKind::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageKind::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageKind::Webp)
        } else {
            None
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
            ImageKind::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Gif => "gif",
            ImageKind::Webp => "webp",
        }
    }
}

/// An upload that passed every check and is ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    pub kind: ImageKind,
    pub key: String,
    pub bytes: Vec<u8>,
}

impl ValidatedImage {
    /// Checks type, size and content, then derives the storage key.
    ///
    /// When no content type was declared the magic bytes decide; when one was
    /// declared it must agree with them.
    pub fn new(
        declared_type: Option<&str>,
        bytes: Vec<u8>,
        max_bytes: usize,
    ) -> Result<Self, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if bytes.len() > max_bytes {
            return Err(UploadError::TooLarge { max_bytes });
        }

        let declared = match declared_type {
            Some(ct) => Some(
                ImageKind::from_content_type(ct)
                    .ok_or_else(|| UploadError::UnsupportedType(ct.to_string()))?,
            ),
            None => None,
        };
        let sniffed = ImageKind::sniff(&bytes).ok_or(UploadError::ContentMismatch)?;
        if declared.is_some_and(|d| d != sniffed) {
            return Err(UploadError::ContentMismatch);
        }

        Ok(Self {
            key: content_address(&bytes, sniffed),
            kind: sniffed,
            bytes,
        })
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// SHA-256 hex of the content plus the format's extension.
pub fn content_address(bytes: &[u8], kind: ImageKind) -> String {
    let digest = Sha256::digest(bytes);
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}.{}", hex, kind.extension())
}

/// Where a stored file can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredUpload {
    pub url: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";

    #[test]
    fn accepts_matching_png() {
        let image = ValidatedImage::new(Some("image/png"), PNG.to_vec(), 1024).unwrap();
        assert_eq!(image.kind, ImageKind::Png);
        assert!(image.key.ends_with(".png"));
        assert_eq!(image.key.len(), 64 + 4);
    }

    #[test]
    fn sniffs_when_type_missing() {
        let image = ValidatedImage::new(None, GIF.to_vec(), 1024).unwrap();
        assert_eq!(image.kind, ImageKind::Gif);
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert_eq!(
            ValidatedImage::new(Some("image/png"), vec![], 1024),
            Err(UploadError::Empty)
        );
        assert_eq!(
            ValidatedImage::new(Some("image/png"), PNG.to_vec(), 4),
            Err(UploadError::TooLarge { max_bytes: 4 })
        );
    }

    #[test]
    fn rejects_unsupported_type() {
        assert!(matches!(
            ValidatedImage::new(Some("application/pdf"), PNG.to_vec(), 1024),
            Err(UploadError::UnsupportedType(_))
        ));
    }

    #[test]
    fn rejects_disguised_content() {
        assert_eq!(
            ValidatedImage::new(Some("image/jpeg"), PNG.to_vec(), 1024),
            Err(UploadError::ContentMismatch)
        );
        assert_eq!(
            ValidatedImage::new(Some("image/png"), b"not an image".to_vec(), 1024),
            Err(UploadError::ContentMismatch)
        );
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        assert_eq!(
            ImageKind::from_content_type("IMAGE/WEBP; charset=binary"),
            Some(ImageKind::Webp)
        );
    }

    #[test]
    fn same_bytes_same_key() {
        assert_eq!(
            content_address(PNG, ImageKind::Png),
            content_address(PNG, ImageKind::Png)
        );
        assert_ne!(
            content_address(PNG, ImageKind::Png),
            content_address(GIF, ImageKind::Png)
        );
    }
}
