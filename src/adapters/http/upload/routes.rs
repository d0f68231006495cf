//! HTTP routes for uploads.

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use super::handlers::{upload_file, UploadHandlers};

/// Room for multipart boundaries and headers around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Mounted at `/api/upload`.
pub fn upload_routes(handlers: UploadHandlers) -> Router {
    let body_limit = handlers.max_bytes() + MULTIPART_OVERHEAD_BYTES;
    Router::new()
        .route("/", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(handlers)
}
