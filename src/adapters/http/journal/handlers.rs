//! HTTP handlers for journal endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{internal_error, invalid_id, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::pagination::PageResponse;
use crate::application::journal::{
    CreateEntryCommand, CreateEntryHandler, DeleteEntryCommand, DeleteEntryHandler,
    GetEntryHandler, GetEntryQuery, ListEntriesHandler, ListEntriesQuery, UpdateEntryCommand,
    UpdateEntryHandler,
};
use crate::domain::foundation::{JournalEntryId, PageRequest};
use crate::domain::journal::JournalError;

use super::dto::{parse_mood, JournalEntryRequest, JournalEntryResponse, ListJournalParams};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct JournalHandlers {
    create_handler: Arc<CreateEntryHandler>,
    get_handler: Arc<GetEntryHandler>,
    list_handler: Arc<ListEntriesHandler>,
    update_handler: Arc<UpdateEntryHandler>,
    delete_handler: Arc<DeleteEntryHandler>,
}

impl JournalHandlers {
    pub fn new(
        create_handler: Arc<CreateEntryHandler>,
        get_handler: Arc<GetEntryHandler>,
        list_handler: Arc<ListEntriesHandler>,
        update_handler: Arc<UpdateEntryHandler>,
        delete_handler: Arc<DeleteEntryHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            update_handler,
            delete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/journal
pub async fn create_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<JournalEntryRequest>,
) -> Response {
    let mood = match parse_mood(req.mood.as_deref()) {
        Ok(mood) => mood,
        Err(message) => return invalid_mood(message),
    };

    let cmd = CreateEntryCommand {
        user_id: user.id,
        title: req.title,
        content: req.content,
        mood,
        tags: req.tags,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(entry) => (StatusCode::CREATED, Json(JournalEntryResponse::from(entry))).into_response(),
        Err(e) => handle_journal_error(e),
    }
}

/// GET /api/journal?page=&per_page=&mood=
pub async fn list_entries(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListJournalParams>,
) -> Response {
    let mood = match parse_mood(params.mood.as_deref()) {
        Ok(mood) => mood,
        Err(message) => return invalid_mood(message),
    };
    let page = PageRequest::new(params.page, params.per_page);

    let query = ListEntriesQuery {
        user_id: user.id,
        mood,
        page,
    };

    match handlers.list_handler.handle(query).await {
        Ok(page) => (
            StatusCode::OK,
            Json(PageResponse::from_page(page, JournalEntryResponse::from)),
        )
            .into_response(),
        Err(e) => handle_journal_error(e),
    }
}

/// GET /api/journal/:id
pub async fn get_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(entry_id): Path<String>,
) -> Response {
    let Ok(entry_id) = entry_id.parse::<JournalEntryId>() else {
        return invalid_id("journal entry");
    };

    let query = GetEntryQuery {
        entry_id,
        user_id: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(entry) => (StatusCode::OK, Json(JournalEntryResponse::from(entry))).into_response(),
        Err(e) => handle_journal_error(e),
    }
}

/// PUT /api/journal/:id - Replace title, content, mood and tags
pub async fn update_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(entry_id): Path<String>,
    Json(req): Json<JournalEntryRequest>,
) -> Response {
    let Ok(entry_id) = entry_id.parse::<JournalEntryId>() else {
        return invalid_id("journal entry");
    };
    let mood = match parse_mood(req.mood.as_deref()) {
        Ok(mood) => mood,
        Err(message) => return invalid_mood(message),
    };

    let cmd = UpdateEntryCommand {
        entry_id,
        user_id: user.id,
        title: req.title,
        content: req.content,
        mood,
        tags: req.tags,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(entry) => (StatusCode::OK, Json(JournalEntryResponse::from(entry))).into_response(),
        Err(e) => handle_journal_error(e),
    }
}

/// DELETE /api/journal/:id
pub async fn delete_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(entry_id): Path<String>,
) -> Response {
    let Ok(entry_id) = entry_id.parse::<JournalEntryId>() else {
        return invalid_id("journal entry");
    };

    let cmd = DeleteEntryCommand {
        entry_id,
        user_id: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_journal_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_mood(message: String) -> Response {
    ErrorResponse::validation("mood", message).into_response_with(StatusCode::BAD_REQUEST)
}

fn handle_journal_error(error: JournalError) -> Response {
    match error {
        JournalError::NotFound(id) => ErrorResponse::not_found("Journal entry", &id.to_string())
            .into_response_with(StatusCode::NOT_FOUND),
        JournalError::Forbidden => ErrorResponse::forbidden("Permission denied")
            .into_response_with(StatusCode::FORBIDDEN),
        JournalError::ValidationFailed { field, message } => {
            ErrorResponse::validation(&field, message).into_response_with(StatusCode::BAD_REQUEST)
        }
        JournalError::Infrastructure(msg) => internal_error("Journal request", msg),
    }
}
