//! HTTP routes for forum endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    create_post, create_reply, delete_post, delete_reply, get_post, list_posts, ForumHandlers,
};

/// Mounted at `/api/posts`.
///
/// - `GET /`, `GET /:id` - public, auth optional
/// - `POST /`, `DELETE /:id` - auth required
/// - `POST /:id/replies`, `DELETE /:id/replies/:reply_id` - auth required
pub fn forum_routes(handlers: ForumHandlers) -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).delete(delete_post))
        .route("/:id/replies", post(create_reply))
        .route("/:id/replies/:reply_id", delete(delete_reply))
        .with_state(handlers)
}
