//! Standard error body shared by every endpoint.
//!
//! ```json
//! {"code": "NOT_FOUND", "message": "Journal entry not found: ...", "details": null}
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    /// 400 for a failed field validation, with the field in `details`.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new("VALIDATION_FAILED", message)
            .with_details(serde_json::json!({ "field": field }))
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Pairs the body with a status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Logs an infrastructure failure and hides its detail from the client.
pub fn internal_error(context: &str, error: impl std::fmt::Display) -> Response {
    tracing::error!(error = %error, "{} failed", context);
    ErrorResponse::internal("An internal error occurred").into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

/// 400 for a path id that isn't a UUID.
pub fn invalid_id(resource_type: &str) -> Response {
    ErrorResponse::bad_request(format!("Invalid {} ID", resource_type))
        .into_response_with(StatusCode::BAD_REQUEST)
}

/// Status for error codes that don't need per-module handling.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::UserNotFound
        | ErrorCode::AssessmentNotFound
        | ErrorCode::JournalEntryNotFound
        | ErrorCode::PostNotFound
        | ErrorCode::ReplyNotFound
        | ErrorCode::MeditationNotFound => StatusCode::NOT_FOUND,
        ErrorCode::EmailTaken => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::AIProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::StorageError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = status_for(self.code);
        if status.is_server_error() {
            return internal_error("Request", &self);
        }
        ErrorResponse::new(self.code.to_string(), self.message).into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_not_found_creates_correctly() {
        let error = ErrorResponse::not_found("Post", "abc-123");
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.message, "Post not found: abc-123");
        assert!(error.details.is_none());
    }

    #[test]
    fn validation_error_carries_field() {
        let error = ErrorResponse::validation("content", "Content is required");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "VALIDATION_FAILED");
        assert_eq!(json["details"]["field"], "content");
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::forbidden("no")).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn domain_error_statuses() {
        assert_eq!(status_for(ErrorCode::PostNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::EmailTaken), StatusCode::CONFLICT);
        assert_eq!(
            DomainError::database("pool closed").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
