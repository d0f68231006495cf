//! HTTP adapter for the companion chat.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatHistoryParams, ChatMessageResponse, SendMessageRequest, SendMessageResponse};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
