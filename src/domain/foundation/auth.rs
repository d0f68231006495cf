//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what remains of a validated bearer token once the
//! provider-specific claims have been mapped. Any OIDC provider (Google,
//! GitHub via a broker, Auth0) can populate it through the `SessionValidator`
//! port; nothing here knows which one issued the token.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Provider subject, used as the primary key of the user record.
    pub id: UserId,

    /// Email address from the token claims.
    pub email: String,

    /// Display name if available (`name` or `preferred_username`).
    pub display_name: Option<String>,

    /// Avatar URL from the `picture` claim.
    pub picture: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            picture: None,
        }
    }

    /// Attaches an avatar URL.
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    /// Name shown to other community members when no profile name is set.
    ///
    /// Falls back to the local part of the email so addresses never leak.
    pub fn public_name(&self) -> String {
        if let Some(name) = self.display_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        self.email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or("member")
            .to_string()
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is malformed or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token lacks a claim we require (e.g. `email`).
    #[error("Token is missing claim: {0}")]
    MissingClaim(&'static str),

    /// The identity provider could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
