//! ListPostsHandler - Public page of community posts, newest first.

use std::sync::Arc;

use crate::domain::forum::{ForumError, Post, PostCategory};
use crate::domain::foundation::{Page, PageRequest};
use crate::ports::ForumRepository;

#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub category: Option<PostCategory>,
    pub page: PageRequest,
}

pub struct ListPostsHandler {
    forum: Arc<dyn ForumRepository>,
}

impl ListPostsHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Page<Post>, ForumError> {
        Ok(self.forum.list_posts(query.category, query.page).await?)
    }
}
