//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::chat::SendChatMessageResult;
use crate::domain::chat::{ChatMessage, ChatRole, CrisisResource};

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatHistoryParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: String,
}

impl From<&ChatMessage> for ChatMessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id().to_string(),
            role: message.role(),
            content: message.content().to_string(),
            created_at: message.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub message: ChatMessageResponse,
    pub reply: ChatMessageResponse,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_resources: Option<&'static [CrisisResource]>,
}

impl From<SendChatMessageResult> for SendMessageResponse {
    fn from(result: SendChatMessageResult) -> Self {
        Self {
            message: ChatMessageResponse::from(&result.user_message),
            reply: ChatMessageResponse::from(&result.reply),
            fallback: result.fallback,
            crisis_resources: result.crisis_resources,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearHistoryResponse {
    pub deleted: u64,
}
