//! DeletePostHandler - Authors remove their post and its replies.

use std::sync::Arc;

use crate::domain::forum::ForumError;
use crate::domain::foundation::{PostId, UserId};
use crate::ports::ForumRepository;

#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub post_id: PostId,
    pub user_id: UserId,
}

pub struct DeletePostHandler {
    forum: Arc<dyn ForumRepository>,
}

impl DeletePostHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, cmd: DeletePostCommand) -> Result<(), ForumError> {
        let post = self
            .forum
            .find_post(&cmd.post_id)
            .await?
            .ok_or(ForumError::PostNotFound(cmd.post_id))?;

        if !post.is_authored_by(&cmd.user_id) {
            return Err(ForumError::Forbidden);
        }

        self.forum.delete_post(&cmd.post_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryForumRepository;
    use crate::domain::forum::{Author, Post, PostCategory, Reply};
    use crate::domain::foundation::ReplyId;

    #[tokio::test]
    async fn only_author_deletes_and_replies_go_too() {
        let forum = Arc::new(InMemoryForumRepository::new());
        let alice = Author {
            id: UserId::new("alice").unwrap(),
            name: "Alice".to_string(),
        };
        let post = Post::new(PostId::new(), alice.clone(), "t", "c", PostCategory::General, false)
            .unwrap();
        forum.insert_post(&post).await.unwrap();
        let reply = Reply::new(ReplyId::new(), *post.id(), alice, "r", false).unwrap();
        forum.add_reply(&reply).await.unwrap();
        let handler = DeletePostHandler::new(forum.clone());

        let denied = handler
            .handle(DeletePostCommand {
                post_id: *post.id(),
                user_id: UserId::new("mallory").unwrap(),
            })
            .await;
        assert_eq!(denied, Err(ForumError::Forbidden));

        handler
            .handle(DeletePostCommand {
                post_id: *post.id(),
                user_id: UserId::new("alice").unwrap(),
            })
            .await
            .unwrap();

        assert!(forum.find_post(post.id()).await.unwrap().is_none());
        assert!(forum.find_reply(reply.id()).await.unwrap().is_none());
    }
}
