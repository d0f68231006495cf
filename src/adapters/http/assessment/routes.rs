//! HTTP routes for assessment endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    assessment_trend, create_assessment, delete_assessment, get_assessment, list_assessments,
    AssessmentHandlers,
};

/// Mounted at `/api/assessments`. Every route requires authentication.
pub fn assessment_routes(handlers: AssessmentHandlers) -> Router {
    Router::new()
        .route("/", get(list_assessments).post(create_assessment))
        .route("/analytics", get(assessment_trend))
        .route("/:id", get(get_assessment).delete(delete_assessment))
        .with_state(handlers)
}
