use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::lock;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn email_conflict(users: &HashMap<UserId, User>, user: &User) -> bool {
    users
        .values()
        .any(|other| other.email() == user.email() && other.id() != user.id())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.users).get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.users)
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let mut users = lock(&self.users);
        if users.contains_key(user.id()) {
            return Err(DomainError::database(format!("User already exists: {}", user.id())));
        }
        if email_conflict(&users, user) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "Email is already registered to another account",
            ));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = lock(&self.users);
        if !users.contains_key(user.id()) {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id()),
            ));
        }
        if email_conflict(&users, user) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "Email is already registered to another account",
            ));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AuthenticatedUser;

    fn user(id: &str, email: &str) -> User {
        User::from_claims(&AuthenticatedUser::new(
            UserId::new(id).unwrap(),
            email,
            None,
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("u1", "a@example.com")).await.unwrap();

        assert!(repo.find_by_id(&UserId::new("u1").unwrap()).await.unwrap().is_some());
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("u1", "a@example.com")).await.unwrap();

        let err = repo.insert(&user("u2", "a@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailTaken);
    }
}
