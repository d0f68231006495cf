//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::user::{
    GetDashboardHandler, GetDashboardQuery, GetProfileHandler, GetProfileQuery,
    SyncSessionCommand, SyncSessionHandler, UpdateProfileCommand, UpdateProfileHandler,
};
use crate::domain::user::UserError;

use super::dto::{SessionResponse, UpdateProfileRequest, UserProfileResponse};

#[derive(Clone)]
pub struct UserHandlers {
    sync_handler: Arc<SyncSessionHandler>,
    profile_handler: Arc<GetProfileHandler>,
    update_handler: Arc<UpdateProfileHandler>,
    dashboard_handler: Arc<GetDashboardHandler>,
}

impl UserHandlers {
    pub fn new(
        sync_handler: Arc<SyncSessionHandler>,
        profile_handler: Arc<GetProfileHandler>,
        update_handler: Arc<UpdateProfileHandler>,
        dashboard_handler: Arc<GetDashboardHandler>,
    ) -> Self {
        Self {
            sync_handler,
            profile_handler,
            update_handler,
            dashboard_handler,
        }
    }
}

/// POST /api/auth/session - Creates or refreshes the user record from the token
pub async fn sync_session(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .sync_handler
        .handle(SyncSessionCommand { claims: user })
        .await
    {
        Ok(result) => {
            let status = if result.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            let body = SessionResponse {
                user: UserProfileResponse::from(&result.user),
                created: result.created,
            };
            (status, Json(body)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/user
pub async fn get_profile(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .profile_handler
        .handle(GetProfileQuery { user_id: user.id })
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(UserProfileResponse::from(&profile))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// PUT /api/user
pub async fn update_profile(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let cmd = UpdateProfileCommand {
        user_id: user.id,
        name: req.name,
        bio: req.bio,
        image_url: req.image_url,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(profile) => (StatusCode::OK, Json(UserProfileResponse::from(&profile))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/user/dashboard
pub async fn get_dashboard(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .dashboard_handler
        .handle(GetDashboardQuery { user_id: user.id })
        .await
    {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(e) => handle_user_error(e),
    }
}

fn handle_user_error(error: UserError) -> Response {
    match error {
        UserError::NotFound(id) => ErrorResponse::not_found("User", &id.to_string())
            .into_response_with(StatusCode::NOT_FOUND),
        UserError::EmailTaken => ErrorResponse::conflict(UserError::EmailTaken.to_string())
            .into_response_with(StatusCode::CONFLICT),
        UserError::ValidationFailed { field, message } => {
            ErrorResponse::validation(&field, message).into_response_with(StatusCode::BAD_REQUEST)
        }
        UserError::Infrastructure(msg) => internal_error("User request", msg),
    }
}
