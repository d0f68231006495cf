//! Forum module - community posts and replies, optionally anonymous.

mod errors;
mod post;

pub use errors::ForumError;
pub use post::{
    Author, Post, PostCategory, Reply, ANONYMOUS_NAME, MAX_POST_CONTENT_LENGTH,
    MAX_POST_TITLE_LENGTH, MAX_REPLY_CONTENT_LENGTH,
};
