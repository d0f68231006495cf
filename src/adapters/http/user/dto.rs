//! DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::user::User;

/// Replaces all editable profile fields. Omitted or blank fields are cleared.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().map(str::to_string),
            bio: user.bio().map(str::to_string),
            image_url: user.image_url().map(str::to_string),
            created_at: *user.created_at(),
            updated_at: *user.updated_at(),
        }
    }
}

/// Body of `POST /api/auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserProfileResponse,
    /// True on the first login for this subject.
    pub created: bool,
}
