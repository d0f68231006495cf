//! Upload command handlers.

mod upload_file;

pub use upload_file::{UploadFileCommand, UploadFileHandler, DEFAULT_MAX_UPLOAD_BYTES};
