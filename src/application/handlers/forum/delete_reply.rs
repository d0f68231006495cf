//! DeleteReplyHandler - Reply authors remove their reply.

use std::sync::Arc;

use crate::domain::forum::ForumError;
use crate::domain::foundation::{PostId, ReplyId, UserId};
use crate::ports::ForumRepository;

#[derive(Debug, Clone)]
pub struct DeleteReplyCommand {
    pub post_id: PostId,
    pub reply_id: ReplyId,
    pub user_id: UserId,
}

pub struct DeleteReplyHandler {
    forum: Arc<dyn ForumRepository>,
}

impl DeleteReplyHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, cmd: DeleteReplyCommand) -> Result<(), ForumError> {
        // A reply addressed through the wrong post does not exist there.
        let reply = self
            .forum
            .find_reply(&cmd.reply_id)
            .await?
            .filter(|r| r.post_id() == &cmd.post_id)
            .ok_or(ForumError::ReplyNotFound(cmd.reply_id))?;

        if !reply.is_authored_by(&cmd.user_id) {
            return Err(ForumError::Forbidden);
        }

        self.forum.delete_reply(&reply).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryForumRepository;
    use crate::domain::forum::{Author, Post, PostCategory, Reply};

    async fn seeded() -> (Arc<InMemoryForumRepository>, Post, Reply) {
        let forum = Arc::new(InMemoryForumRepository::new());
        let author = |id: &str| Author {
            id: UserId::new(id).unwrap(),
            name: id.to_string(),
        };
        let post =
            Post::new(PostId::new(), author("alice"), "t", "c", PostCategory::General, false)
                .unwrap();
        forum.insert_post(&post).await.unwrap();
        let reply = Reply::new(ReplyId::new(), *post.id(), author("bob"), "r", true).unwrap();
        forum.add_reply(&reply).await.unwrap();
        (forum, post, reply)
    }

    #[tokio::test]
    async fn reply_author_deletes_and_count_drops() {
        let (forum, post, reply) = seeded().await;
        let handler = DeleteReplyHandler::new(forum.clone());

        handler
            .handle(DeleteReplyCommand {
                post_id: *post.id(),
                reply_id: *reply.id(),
                user_id: UserId::new("bob").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(forum.find_post(post.id()).await.unwrap().unwrap().reply_count(), 0);
    }

    #[tokio::test]
    async fn post_author_cannot_delete_someone_elses_reply() {
        let (forum, post, reply) = seeded().await;
        let handler = DeleteReplyHandler::new(forum);

        let result = handler
            .handle(DeleteReplyCommand {
                post_id: *post.id(),
                reply_id: *reply.id(),
                user_id: UserId::new("alice").unwrap(),
            })
            .await;

        assert_eq!(result, Err(ForumError::Forbidden));
    }

    #[tokio::test]
    async fn wrong_post_is_not_found() {
        let (forum, _post, reply) = seeded().await;
        let handler = DeleteReplyHandler::new(forum);

        let result = handler
            .handle(DeleteReplyCommand {
                post_id: PostId::new(),
                reply_id: *reply.id(),
                user_id: UserId::new("bob").unwrap(),
            })
            .await;

        assert_eq!(result, Err(ForumError::ReplyNotFound(*reply.id())));
    }
}
