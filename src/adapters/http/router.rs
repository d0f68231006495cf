//! Application router - wires handlers to ports and mounts every module.
//!
//! ```text
//! /health
//! /api/auth/session          user sync on login
//! /api/user[/dashboard]      profile and dashboard
//! /api/assessments[/...]
//! /api/chat
//! /api/journal[/...]
//! /api/posts[/...]           forum
//! /api/meditations[/...]
//! /api/upload
//! /uploads/*                 stored files (when served locally)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use http::{header, HeaderName, HeaderValue, Method};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::ai_budget::DEFAULT_AI_BUDGET;
use crate::application::assessment::{
    CreateAssessmentHandler, DeleteAssessmentHandler, GetAssessmentHandler,
    GetAssessmentTrendHandler, ListAssessmentsHandler,
};
use crate::application::chat::{
    ClearChatHistoryHandler, GetChatHistoryHandler, SendChatMessageHandler,
};
use crate::application::forum::{
    CreatePostHandler, CreateReplyHandler, DeletePostHandler, DeleteReplyHandler, GetPostHandler,
    ListPostsHandler,
};
use crate::application::journal::{
    CreateEntryHandler, DeleteEntryHandler, GetEntryHandler, ListEntriesHandler,
    UpdateEntryHandler,
};
use crate::application::upload::{UploadFileHandler, DEFAULT_MAX_UPLOAD_BYTES};
use crate::application::user::{
    GetDashboardHandler, GetProfileHandler, SyncSessionHandler, UpdateProfileHandler,
};
use crate::ports::{
    AIProvider, AssessmentRepository, ChatRepository, FileStorage, ForumRepository,
    JournalRepository, SessionValidator, UserRepository,
};

use super::assessment::{assessment_routes, AssessmentHandlers};
use super::chat::{chat_routes, ChatHandlers};
use super::forum::{forum_routes, ForumHandlers};
use super::health::health;
use super::journal::{journal_routes, JournalHandlers};
use super::meditation::meditation_routes;
use super::middleware::{auth_middleware, AuthState};
use super::trace::REQUEST_ID_HEADER;
use super::upload::{upload_routes, UploadHandlers};
use super::user::{auth_routes, user_routes, UserHandlers};

/// Every port the HTTP surface depends on.
#[derive(Clone)]
pub struct AppPorts {
    pub users: Arc<dyn UserRepository>,
    pub assessments: Arc<dyn AssessmentRepository>,
    pub chat: Arc<dyn ChatRepository>,
    pub journal: Arc<dyn JournalRepository>,
    pub forum: Arc<dyn ForumRepository>,
    pub ai: Arc<dyn AIProvider>,
    pub storage: Arc<dyn FileStorage>,
    pub sessions: Arc<dyn SessionValidator>,
}

/// Transport settings for the outer middleware stack.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub max_upload_bytes: usize,
    pub request_timeout: Duration,
    /// Wait for an AI reply before falling back. Must stay below `request_timeout`.
    pub ai_budget: Duration,
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Directory served at `public_path`, if files are stored locally.
    pub upload_dir: Option<PathBuf>,
    pub public_path: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout: Duration::from_secs(60),
            ai_budget: DEFAULT_AI_BUDGET,
            cors_origins: Vec::new(),
            upload_dir: None,
            public_path: "/uploads".to_string(),
        }
    }
}

/// Routes plus auth, without transport layers.
pub fn api_router(ports: &AppPorts, options: &HttpOptions) -> Router {
    let assessment = AssessmentHandlers::new(
        Arc::new(
            CreateAssessmentHandler::new(ports.assessments.clone(), ports.ai.clone())
                .with_ai_budget(options.ai_budget),
        ),
        Arc::new(GetAssessmentHandler::new(ports.assessments.clone())),
        Arc::new(ListAssessmentsHandler::new(ports.assessments.clone())),
        Arc::new(DeleteAssessmentHandler::new(ports.assessments.clone())),
        Arc::new(GetAssessmentTrendHandler::new(ports.assessments.clone())),
    );

    let chat = ChatHandlers::new(
        Arc::new(
            SendChatMessageHandler::new(ports.chat.clone(), ports.ai.clone())
                .with_ai_budget(options.ai_budget),
        ),
        Arc::new(GetChatHistoryHandler::new(ports.chat.clone())),
        Arc::new(ClearChatHistoryHandler::new(ports.chat.clone())),
    );

    let journal = JournalHandlers::new(
        Arc::new(CreateEntryHandler::new(ports.journal.clone())),
        Arc::new(GetEntryHandler::new(ports.journal.clone())),
        Arc::new(ListEntriesHandler::new(ports.journal.clone())),
        Arc::new(UpdateEntryHandler::new(ports.journal.clone())),
        Arc::new(DeleteEntryHandler::new(ports.journal.clone())),
    );

    let forum = ForumHandlers::new(
        Arc::new(CreatePostHandler::new(ports.forum.clone(), ports.users.clone())),
        Arc::new(ListPostsHandler::new(ports.forum.clone())),
        Arc::new(GetPostHandler::new(ports.forum.clone())),
        Arc::new(DeletePostHandler::new(ports.forum.clone())),
        Arc::new(CreateReplyHandler::new(ports.forum.clone(), ports.users.clone())),
        Arc::new(DeleteReplyHandler::new(ports.forum.clone())),
    );

    let user = UserHandlers::new(
        Arc::new(SyncSessionHandler::new(ports.users.clone())),
        Arc::new(GetProfileHandler::new(ports.users.clone())),
        Arc::new(UpdateProfileHandler::new(ports.users.clone())),
        Arc::new(GetDashboardHandler::new(
            ports.assessments.clone(),
            ports.journal.clone(),
            ports.chat.clone(),
            ports.forum.clone(),
        )),
    );

    let upload = UploadHandlers::new(Arc::new(UploadFileHandler::new(
        ports.storage.clone(),
        options.max_upload_bytes,
    )));

    let auth_state: AuthState = ports.sessions.clone();

    let api = Router::new()
        .nest("/auth", auth_routes(user.clone()))
        .nest("/user", user_routes(user))
        .nest("/assessments", assessment_routes(assessment))
        .nest("/chat", chat_routes(chat))
        .nest("/journal", journal_routes(journal))
        .nest("/posts", forum_routes(forum))
        .nest("/meditations", meditation_routes())
        .nest("/upload", upload_routes(upload))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// The full application: routes, static uploads and transport layers.
pub fn app_router(ports: &AppPorts, options: &HttpOptions) -> Router {
    let mut router = api_router(ports, options);

    if let Some(dir) = &options.upload_dir {
        router = router.nest_service(&options.public_path, ServeDir::new(dir));
    }

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::{
        InMemoryAssessmentRepository, InMemoryChatRepository, InMemoryForumRepository,
        InMemoryJournalRepository, InMemoryUserRepository,
    };
    use crate::adapters::storage::InMemoryFileStorage;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn ports() -> AppPorts {
        AppPorts {
            users: Arc::new(InMemoryUserRepository::new()),
            assessments: Arc::new(InMemoryAssessmentRepository::new()),
            chat: Arc::new(InMemoryChatRepository::new()),
            journal: Arc::new(InMemoryJournalRepository::new()),
            forum: Arc::new(InMemoryForumRepository::new()),
            ai: Arc::new(MockAIProvider::new()),
            storage: Arc::new(InMemoryFileStorage::new()),
            sessions: Arc::new(MockSessionValidator::new()),
        }
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app_router(&ports(), &HttpOptions::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = api_router(&ports(), &HttpOptions::default())
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
