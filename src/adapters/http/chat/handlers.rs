//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::trace::trace_id;
use crate::application::chat::{
    ClearChatHistoryCommand, ClearChatHistoryHandler, GetChatHistoryHandler, GetChatHistoryQuery,
    SendChatMessageCommand, SendChatMessageHandler,
};
use crate::domain::chat::ChatError;

use super::dto::{
    ChatHistoryParams, ChatMessageResponse, ClearHistoryResponse, SendMessageRequest,
    SendMessageResponse,
};

#[derive(Clone)]
pub struct ChatHandlers {
    send_handler: Arc<SendChatMessageHandler>,
    history_handler: Arc<GetChatHistoryHandler>,
    clear_handler: Arc<ClearChatHistoryHandler>,
}

impl ChatHandlers {
    pub fn new(
        send_handler: Arc<SendChatMessageHandler>,
        history_handler: Arc<GetChatHistoryHandler>,
        clear_handler: Arc<ClearChatHistoryHandler>,
    ) -> Self {
        Self {
            send_handler,
            history_handler,
            clear_handler,
        }
    }
}

/// POST /api/chat - Send a message and get the companion's reply
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let cmd = SendChatMessageCommand {
        user_id: user.id,
        content: req.content,
        trace_id: trace_id(&headers),
    };

    match handlers.send_handler.handle(cmd).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(SendMessageResponse::from(result))).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/chat?limit= - Conversation history, oldest first
pub async fn get_history(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ChatHistoryParams>,
) -> Response {
    let query = GetChatHistoryQuery {
        user_id: user.id,
        limit: params.limit,
    };

    match handlers.history_handler.handle(query).await {
        Ok(messages) => {
            let response: Vec<ChatMessageResponse> =
                messages.iter().map(ChatMessageResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// DELETE /api/chat - Forget the whole conversation
pub async fn clear_history(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = ClearChatHistoryCommand { user_id: user.id };

    match handlers.clear_handler.handle(cmd).await {
        Ok(deleted) => (StatusCode::OK, Json(ClearHistoryResponse { deleted })).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

fn handle_chat_error(error: ChatError) -> Response {
    match error {
        ChatError::ValidationFailed { field, message } => {
            ErrorResponse::validation(&field, message).into_response_with(StatusCode::BAD_REQUEST)
        }
        ChatError::Infrastructure(msg) => internal_error("Chat request", msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = handle_chat_error(ChatError::ValidationFailed {
            field: "content".to_string(),
            message: "empty".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_chat_error(ChatError::Infrastructure("db".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
