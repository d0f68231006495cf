//! GetPostHandler - A post with its replies.

use std::sync::Arc;

use crate::domain::forum::{ForumError, Post, Reply};
use crate::domain::foundation::PostId;
use crate::ports::ForumRepository;

#[derive(Debug, Clone)]
pub struct GetPostQuery {
    pub post_id: PostId,
}

#[derive(Debug, Clone)]
pub struct PostWithReplies {
    pub post: Post,
    /// Oldest first.
    pub replies: Vec<Reply>,
}

pub struct GetPostHandler {
    forum: Arc<dyn ForumRepository>,
}

impl GetPostHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, query: GetPostQuery) -> Result<PostWithReplies, ForumError> {
        let post = self
            .forum
            .find_post(&query.post_id)
            .await?
            .ok_or(ForumError::PostNotFound(query.post_id))?;

        let replies = self.forum.list_replies(&query.post_id).await?;

        Ok(PostWithReplies { post, replies })
    }
}
