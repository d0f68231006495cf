//! HTTP routes for meditation endpoints.

use axum::{routing::get, Router};

use super::handlers;

/// Mounted at `/api/meditations`. No auth required.
pub fn meditation_routes() -> Router {
    Router::new()
        .route("/", get(handlers::list))
        .route("/categories", get(handlers::categories))
        .route("/:slug", get(handlers::get))
}
