//! HTTP handler for `POST /api/upload`.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::upload::{UploadFileCommand, UploadFileHandler};
use crate::domain::upload::UploadError;

/// Name of the multipart part holding the image.
const FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct UploadHandlers {
    upload_handler: Arc<UploadFileHandler>,
}

impl UploadHandlers {
    pub fn new(upload_handler: Arc<UploadFileHandler>) -> Self {
        Self { upload_handler }
    }

    pub fn max_bytes(&self) -> usize {
        self.upload_handler.max_bytes()
    }
}

/// POST /api/upload - multipart/form-data with a `file` part
pub async fn upload_file(
    State(handlers): State<UploadHandlers>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Response {
    let (declared_type, bytes) = match read_file_field(multipart).await {
        Ok(file) => file,
        Err(e) => return handle_upload_error(e),
    };

    let cmd = UploadFileCommand {
        user_id: user.id,
        declared_type,
        bytes,
    };

    match handlers.upload_handler.handle(cmd).await {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(e) => handle_upload_error(e),
    }
}

/// Pulls the first `file` part out of the form. Other parts are skipped.
async fn read_file_field(
    mut multipart: Multipart,
) -> Result<(Option<String>, Vec<u8>), UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let declared_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Malformed(e.body_text()))?;
        return Ok((declared_type, bytes.to_vec()));
    }
    Err(UploadError::MissingFile)
}

fn handle_upload_error(error: UploadError) -> Response {
    match error {
        UploadError::Storage(msg) => internal_error("Upload storage", msg),
        other => ErrorResponse::validation(FILE_FIELD, other.to_string())
            .into_response_with(StatusCode::BAD_REQUEST),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_errors_map_to_statuses() {
        assert_eq!(
            handle_upload_error(UploadError::MissingFile).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_upload_error(UploadError::ContentMismatch).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_upload_error(UploadError::TooLarge { max_bytes: 10 }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_upload_error(UploadError::Storage("disk full".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
