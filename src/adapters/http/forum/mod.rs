//! HTTP adapter for the community forum.
//!
//! Reads are public; the viewer (when signed in) only affects the
//! `is_author` flags. Writes require authentication.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreatePostRequest, CreateReplyRequest, ListPostsParams, PostDetailResponse, PostResponse,
    ReplyResponse,
};
pub use handlers::ForumHandlers;
pub use routes::forum_routes;
