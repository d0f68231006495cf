//! HTTP handlers for assessment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{internal_error, invalid_id, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::trace::trace_id;
use crate::application::assessment::{
    CreateAssessmentCommand, CreateAssessmentHandler, DeleteAssessmentCommand,
    DeleteAssessmentHandler, GetAssessmentHandler, GetAssessmentQuery, GetAssessmentTrendHandler,
    GetAssessmentTrendQuery, ListAssessmentsHandler, ListAssessmentsQuery,
};
use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::AssessmentId;

use super::dto::{AssessmentResponse, AssessmentTrendResponse, CreateAssessmentRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssessmentHandlers {
    create_handler: Arc<CreateAssessmentHandler>,
    get_handler: Arc<GetAssessmentHandler>,
    list_handler: Arc<ListAssessmentsHandler>,
    delete_handler: Arc<DeleteAssessmentHandler>,
    trend_handler: Arc<GetAssessmentTrendHandler>,
}

impl AssessmentHandlers {
    pub fn new(
        create_handler: Arc<CreateAssessmentHandler>,
        get_handler: Arc<GetAssessmentHandler>,
        list_handler: Arc<ListAssessmentsHandler>,
        delete_handler: Arc<DeleteAssessmentHandler>,
        trend_handler: Arc<GetAssessmentTrendHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            delete_handler,
            trend_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/assessments - Score answers and attach an insight
pub async fn create_assessment(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Json(req): Json<CreateAssessmentRequest>,
) -> Response {
    let cmd = CreateAssessmentCommand {
        user_id: user.id,
        answers: req.answers,
        trace_id: trace_id(&headers),
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(assessment) => (
            StatusCode::CREATED,
            Json(AssessmentResponse::from(&assessment)),
        )
            .into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessments - The caller's assessments, newest first
pub async fn list_assessments(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListAssessmentsQuery { user_id: user.id };

    match handlers.list_handler.handle(query).await {
        Ok(assessments) => {
            let response: Vec<AssessmentResponse> =
                assessments.iter().map(AssessmentResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessments/analytics - Progress across all assessments
pub async fn assessment_trend(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetAssessmentTrendQuery { user_id: user.id };

    match handlers.trend_handler.handle(query).await {
        Ok(trend) => (StatusCode::OK, Json(AssessmentTrendResponse::from(trend))).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessments/:id
pub async fn get_assessment(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(assessment_id): Path<String>,
) -> Response {
    let Ok(assessment_id) = assessment_id.parse::<AssessmentId>() else {
        return invalid_id("assessment");
    };

    let query = GetAssessmentQuery {
        assessment_id,
        user_id: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(assessment) => {
            (StatusCode::OK, Json(AssessmentResponse::from(&assessment))).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// DELETE /api/assessments/:id
pub async fn delete_assessment(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(assessment_id): Path<String>,
) -> Response {
    let Ok(assessment_id) = assessment_id.parse::<AssessmentId>() else {
        return invalid_id("assessment");
    };

    let cmd = DeleteAssessmentCommand {
        assessment_id,
        user_id: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_assessment_error(error: AssessmentError) -> Response {
    match error {
        AssessmentError::NotFound(id) => {
            ErrorResponse::not_found("Assessment", &id.to_string())
                .into_response_with(StatusCode::NOT_FOUND)
        }
        AssessmentError::Forbidden => ErrorResponse::forbidden("Permission denied")
            .into_response_with(StatusCode::FORBIDDEN),
        AssessmentError::ValidationFailed { field, message } => {
            ErrorResponse::validation(&field, message).into_response_with(StatusCode::BAD_REQUEST)
        }
        AssessmentError::Infrastructure(msg) => internal_error("Assessment request", msg),
    }
}
