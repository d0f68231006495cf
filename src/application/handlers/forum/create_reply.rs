//! CreateReplyHandler - Adds a reply to an existing post.

use std::sync::Arc;

use super::resolve_author;
use crate::domain::forum::{ForumError, Reply};
use crate::domain::foundation::{AuthenticatedUser, PostId, ReplyId};
use crate::ports::{ForumRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateReplyCommand {
    pub post_id: PostId,
    pub author: AuthenticatedUser,
    pub content: String,
    pub anonymous: bool,
}

pub struct CreateReplyHandler {
    forum: Arc<dyn ForumRepository>,
    users: Arc<dyn UserRepository>,
}

impl CreateReplyHandler {
    pub fn new(forum: Arc<dyn ForumRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { forum, users }
    }

    pub async fn handle(&self, cmd: CreateReplyCommand) -> Result<Reply, ForumError> {
        if self.forum.find_post(&cmd.post_id).await?.is_none() {
            return Err(ForumError::PostNotFound(cmd.post_id));
        }

        let author = resolve_author(self.users.as_ref(), &cmd.author).await?;
        let reply = Reply::new(ReplyId::new(), cmd.post_id, author, &cmd.content, cmd.anonymous)?;

        self.forum.add_reply(&reply).await?;

        Ok(reply)
    }
}
