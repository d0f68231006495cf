//! HTTP handlers for forum endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{internal_error, invalid_id, ErrorResponse};
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::adapters::http::pagination::PageResponse;
use crate::application::forum::{
    CreatePostCommand, CreatePostHandler, CreateReplyCommand, CreateReplyHandler,
    DeletePostCommand, DeletePostHandler, DeleteReplyCommand, DeleteReplyHandler, GetPostHandler,
    GetPostQuery, ListPostsHandler, ListPostsQuery,
};
use crate::domain::forum::ForumError;
use crate::domain::foundation::{PageRequest, PostId, ReplyId};

use super::dto::{
    parse_category, CreatePostRequest, CreateReplyRequest, ListPostsParams, PostDetailResponse,
    PostResponse, ReplyResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ForumHandlers {
    create_post_handler: Arc<CreatePostHandler>,
    list_posts_handler: Arc<ListPostsHandler>,
    get_post_handler: Arc<GetPostHandler>,
    delete_post_handler: Arc<DeletePostHandler>,
    create_reply_handler: Arc<CreateReplyHandler>,
    delete_reply_handler: Arc<DeleteReplyHandler>,
}

impl ForumHandlers {
    pub fn new(
        create_post_handler: Arc<CreatePostHandler>,
        list_posts_handler: Arc<ListPostsHandler>,
        get_post_handler: Arc<GetPostHandler>,
        delete_post_handler: Arc<DeletePostHandler>,
        create_reply_handler: Arc<CreateReplyHandler>,
        delete_reply_handler: Arc<DeleteReplyHandler>,
    ) -> Self {
        Self {
            create_post_handler,
            list_posts_handler,
            get_post_handler,
            delete_post_handler,
            create_reply_handler,
            delete_reply_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Posts
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/posts
pub async fn create_post(
    State(handlers): State<ForumHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreatePostRequest>,
) -> Response {
    let category = match parse_category(req.category.as_deref()) {
        Ok(category) => category.unwrap_or_default(),
        Err(message) => return invalid_category(message),
    };
    let viewer = user.id.clone();

    let cmd = CreatePostCommand {
        author: user,
        title: req.title,
        content: req.content,
        category,
        anonymous: req.anonymous,
    };

    match handlers.create_post_handler.handle(cmd).await {
        Ok(post) => (
            StatusCode::CREATED,
            Json(PostResponse::for_viewer(&post, Some(&viewer))),
        )
            .into_response(),
        Err(e) => handle_forum_error(e),
    }
}

/// GET /api/posts?page=&per_page=&category= - Newest first
pub async fn list_posts(
    State(handlers): State<ForumHandlers>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<ListPostsParams>,
) -> Response {
    let category = match parse_category(params.category.as_deref()) {
        Ok(category) => category,
        Err(message) => return invalid_category(message),
    };

    let query = ListPostsQuery {
        category,
        page: PageRequest::new(params.page, params.per_page),
    };
    let viewer = user.map(|u| u.id);

    match handlers.list_posts_handler.handle(query).await {
        Ok(page) => {
            let response =
                PageResponse::from_page(page, |p| PostResponse::for_viewer(&p, viewer.as_ref()));
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_forum_error(e),
    }
}

/// GET /api/posts/:id - The post with its replies, oldest first
pub async fn get_post(
    State(handlers): State<ForumHandlers>,
    OptionalAuth(user): OptionalAuth,
    Path(post_id): Path<String>,
) -> Response {
    let Ok(post_id) = post_id.parse::<PostId>() else {
        return invalid_id("post");
    };
    let viewer = user.map(|u| u.id);

    match handlers.get_post_handler.handle(GetPostQuery { post_id }).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(PostDetailResponse::for_viewer(&detail, viewer.as_ref())),
        )
            .into_response(),
        Err(e) => handle_forum_error(e),
    }
}

/// DELETE /api/posts/:id - Author only; replies go with it
pub async fn delete_post(
    State(handlers): State<ForumHandlers>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<String>,
) -> Response {
    let Ok(post_id) = post_id.parse::<PostId>() else {
        return invalid_id("post");
    };

    let cmd = DeletePostCommand {
        post_id,
        user_id: user.id,
    };

    match handlers.delete_post_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_forum_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Replies
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/posts/:id/replies
pub async fn create_reply(
    State(handlers): State<ForumHandlers>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<String>,
    Json(req): Json<CreateReplyRequest>,
) -> Response {
    let Ok(post_id) = post_id.parse::<PostId>() else {
        return invalid_id("post");
    };
    let viewer = user.id.clone();

    let cmd = CreateReplyCommand {
        post_id,
        author: user,
        content: req.content,
        anonymous: req.anonymous,
    };

    match handlers.create_reply_handler.handle(cmd).await {
        Ok(reply) => (
            StatusCode::CREATED,
            Json(ReplyResponse::for_viewer(&reply, Some(&viewer))),
        )
            .into_response(),
        Err(e) => handle_forum_error(e),
    }
}

/// DELETE /api/posts/:post_id/replies/:reply_id - Reply author only
pub async fn delete_reply(
    State(handlers): State<ForumHandlers>,
    RequireAuth(user): RequireAuth,
    Path((post_id, reply_id)): Path<(String, String)>,
) -> Response {
    let Ok(post_id) = post_id.parse::<PostId>() else {
        return invalid_id("post");
    };
    let Ok(reply_id) = reply_id.parse::<ReplyId>() else {
        return invalid_id("reply");
    };

    let cmd = DeleteReplyCommand {
        post_id,
        reply_id,
        user_id: user.id,
    };

    match handlers.delete_reply_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_forum_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_category(message: String) -> Response {
    ErrorResponse::validation("category", message).into_response_with(StatusCode::BAD_REQUEST)
}

fn handle_forum_error(error: ForumError) -> Response {
    match error {
        ForumError::PostNotFound(id) => ErrorResponse::not_found("Post", &id.to_string())
            .into_response_with(StatusCode::NOT_FOUND),
        ForumError::ReplyNotFound(id) => ErrorResponse::not_found("Reply", &id.to_string())
            .into_response_with(StatusCode::NOT_FOUND),
        ForumError::Forbidden => ErrorResponse::forbidden("Only the author can do that")
            .into_response_with(StatusCode::FORBIDDEN),
        ForumError::ValidationFailed { field, message } => {
            ErrorResponse::validation(&field, message).into_response_with(StatusCode::BAD_REQUEST)
        }
        ForumError::Infrastructure(msg) => internal_error("Forum request", msg),
    }
}
