//! HTTP handlers for meditation endpoints.
//!
//! The catalog is compiled into the binary, so these call the domain
//! directly with no application layer in between.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::domain::meditation::{
    category_counts, find_meditation, list_meditations, MeditationCategory, MeditationError,
    MeditationFilter,
};

use super::dto::{ListMeditationsParams, MeditationListResponse};

/// GET /api/meditations?category=&max_minutes=
pub async fn list(Query(params): Query<ListMeditationsParams>) -> Response {
    let category = match params.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match MeditationCategory::parse(raw) {
            Some(category) => Some(category),
            None => {
                return handle_meditation_error(MeditationError::UnknownCategory(raw.to_string()))
            }
        },
    };

    let filter = MeditationFilter {
        category,
        max_minutes: params.max_minutes,
    };

    match list_meditations(filter) {
        Ok(items) => (StatusCode::OK, Json(MeditationListResponse::from(items))).into_response(),
        Err(e) => handle_meditation_error(e),
    }
}

/// GET /api/meditations/categories
pub async fn categories() -> Response {
    match category_counts() {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(e) => handle_meditation_error(e),
    }
}

/// GET /api/meditations/:slug
pub async fn get(Path(slug): Path<String>) -> Response {
    match find_meditation(&slug) {
        Ok(meditation) => (StatusCode::OK, Json(meditation)).into_response(),
        Err(e) => handle_meditation_error(e),
    }
}

fn handle_meditation_error(error: MeditationError) -> Response {
    match error {
        MeditationError::NotFound(slug) => {
            ErrorResponse::not_found("Meditation", &slug).into_response_with(StatusCode::NOT_FOUND)
        }
        MeditationError::UnknownCategory(raw) => ErrorResponse::validation(
            "category",
            format!("Unknown meditation category '{}'", raw),
        )
        .into_response_with(StatusCode::BAD_REQUEST),
        MeditationError::Catalog(msg) => internal_error("Meditation catalog", msg),
    }
}
