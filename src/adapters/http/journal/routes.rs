//! HTTP routes for journal endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_entry, delete_entry, get_entry, list_entries, update_entry, JournalHandlers,
};

/// Mounted at `/api/journal`. Entries are private to their owner.
pub fn journal_routes(handlers: JournalHandlers) -> Router {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route(
            "/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .with_state(handlers)
}
