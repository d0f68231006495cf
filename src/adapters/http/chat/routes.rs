//! HTTP routes for chat endpoints.

use axum::{routing::get, Router};

use super::handlers::{clear_history, get_history, send_message, ChatHandlers};

/// Mounted at `/api/chat`.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route(
            "/",
            get(get_history).post(send_message).delete(clear_history),
        )
        .with_state(handlers)
}
