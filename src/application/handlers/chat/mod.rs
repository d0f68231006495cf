//! Chat command and query handlers.

mod clear_history;
mod get_history;
mod send_message;

pub use clear_history::{ClearChatHistoryCommand, ClearChatHistoryHandler};
pub use get_history::{
    GetChatHistoryHandler, GetChatHistoryQuery, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
pub use send_message::{SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult};
