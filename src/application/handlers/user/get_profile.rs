//! GetProfileHandler - The caller's stored profile.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<User, UserError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or(UserError::NotFound(query.user_id))
    }
}
