//! HTTP routes for user endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_dashboard, get_profile, sync_session, update_profile, UserHandlers};

/// Mounted at `/api/user`.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/dashboard", get(get_dashboard))
        .with_state(handlers)
}

/// Mounted at `/api/auth`.
pub fn auth_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/session", post(sync_session))
        .with_state(handlers)
}
