//! Assessment-specific error types.

use crate::domain::foundation::{AssessmentId, DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    NotFound(AssessmentId),
    Forbidden,
    ValidationFailed { field: String, message: String },
    Infrastructure(String),
}

impl AssessmentError {
    pub fn not_found(id: AssessmentId) -> Self {
        AssessmentError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AssessmentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::NotFound(_) => ErrorCode::AssessmentNotFound,
            AssessmentError::Forbidden => ErrorCode::Forbidden,
            AssessmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AssessmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AssessmentError::NotFound(id) => format!("Assessment not found: {}", id),
            AssessmentError::Forbidden => "Permission denied".to_string(),
            AssessmentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AssessmentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AssessmentError {}

impl From<ValidationError> for AssessmentError {
    fn from(err: ValidationError) -> Self {
        AssessmentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AssessmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => AssessmentError::Forbidden,
            ErrorCode::ValidationFailed => AssessmentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AssessmentError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_keeps_field() {
        let err: AssessmentError = ValidationError::out_of_range("score", 1, 5, 7).into();
        assert!(matches!(err, AssessmentError::ValidationFailed { ref field, .. } if field == "score"));
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn database_error_maps_to_infrastructure() {
        let err: AssessmentError = DomainError::database("connection reset").into();
        assert!(matches!(err, AssessmentError::Infrastructure(_)));
    }
}
