//! HTTP DTOs for forum endpoints.

use serde::{Deserialize, Serialize};

use crate::application::forum::PostWithReplies;
use crate::domain::forum::{Post, PostCategory, Reply};
use crate::domain::foundation::UserId;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReplyRequest {
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Parses an optional category, treating blank as absent.
pub fn parse_category(raw: Option<&str>) -> Result<Option<PostCategory>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => PostCategory::parse(s)
            .map(Some)
            .ok_or_else(|| format!("Unknown category '{}'", s)),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A post as seen by `viewer`. Anonymous posts never expose the author id.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: PostCategory,
    pub author_id: Option<String>,
    pub author_name: String,
    pub anonymous: bool,
    pub is_author: bool,
    pub reply_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl PostResponse {
    pub fn for_viewer(post: &Post, viewer: Option<&UserId>) -> Self {
        Self {
            id: post.id().to_string(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            category: post.category(),
            author_id: post.public_author_id().map(|id| id.to_string()),
            author_name: post.public_author_name().to_string(),
            anonymous: post.is_anonymous(),
            is_author: viewer.is_some_and(|v| post.is_authored_by(v)),
            reply_count: post.reply_count(),
            created_at: post.created_at().to_rfc3339(),
            updated_at: post.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author_id: Option<String>,
    pub author_name: String,
    pub anonymous: bool,
    pub is_author: bool,
    pub created_at: String,
}

impl ReplyResponse {
    pub fn for_viewer(reply: &Reply, viewer: Option<&UserId>) -> Self {
        Self {
            id: reply.id().to_string(),
            post_id: reply.post_id().to_string(),
            content: reply.content().to_string(),
            author_id: reply.public_author_id().map(|id| id.to_string()),
            author_name: reply.public_author_name().to_string(),
            anonymous: reply.is_anonymous(),
            is_author: viewer.is_some_and(|v| reply.is_authored_by(v)),
            created_at: reply.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub replies: Vec<ReplyResponse>,
}

impl PostDetailResponse {
    pub fn for_viewer(detail: &PostWithReplies, viewer: Option<&UserId>) -> Self {
        Self {
            post: PostResponse::for_viewer(&detail.post, viewer),
            replies: detail
                .replies
                .iter()
                .map(|r| ReplyResponse::for_viewer(r, viewer))
                .collect(),
        }
    }
}
