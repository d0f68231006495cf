//! Upload module - validation and content addressing of user images.

mod errors;
mod image;

pub use errors::UploadError;
pub use image::{content_address, ImageKind, StoredUpload, ValidatedImage};
