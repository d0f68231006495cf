//! Bearer token validation.
//!
//! The auth middleware hands every `Authorization: Bearer` token to a
//! [`SessionValidator`] and attaches the resulting [`AuthenticatedUser`] to
//! the request. Production uses `OidcSessionValidator`, which verifies the
//! token against the issuer's JWKS document; tests use a fixed token table.
//!
//! Identity mapping, whatever the implementation:
//!
//! | claim                             | field                       |
//! |-----------------------------------|-----------------------------|
//! | `sub`                             | `id` (stable across logins) |
//! | `email`                           | `email` (required)          |
//! | `name`, else `preferred_username` | `display_name`              |
//! | `picture`                         | `picture`                   |
//!
//! Mindspace keys profiles and forum author names off the email, so a token
//! without a non-blank `email` claim is rejected with
//! `AuthError::MissingClaim("email")` even when its signature is good.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Turns a raw bearer token into the user it was issued to.
///
/// Errors map to HTTP in the middleware: `ServiceUnavailable` (JWKS
/// unreachable) becomes 503, everything else 401.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the value after `Bearer `, already trimmed.
    ///
    /// Implementations check signature, `iss`, `aud` and `exp`, returning
    /// `InvalidToken` or `TokenExpired` on failure and `MissingClaim` when
    /// `sub` or `email` cannot be mapped.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;

    /// Decoded claims standing in for a signed token.
    #[derive(Clone, Default)]
    struct Claims {
        sub: &'static str,
        email: Option<&'static str>,
        name: Option<&'static str>,
        preferred_username: Option<&'static str>,
        picture: Option<&'static str>,
        expired: bool,
    }

    /// Applies the claim mapping above to pre-decoded claims.
    struct ClaimsTable {
        tokens: HashMap<&'static str, Claims>,
        issuer_reachable: bool,
    }

    impl ClaimsTable {
        fn new(entries: &[(&'static str, Claims)]) -> Self {
            Self {
                tokens: entries.iter().cloned().collect(),
                issuer_reachable: true,
            }
        }
    }

    #[async_trait]
    impl SessionValidator for ClaimsTable {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            if !self.issuer_reachable {
                return Err(AuthError::service_unavailable("jwks fetch failed"));
            }
            let claims = self.tokens.get(token).ok_or(AuthError::InvalidToken)?;
            if claims.expired {
                return Err(AuthError::TokenExpired);
            }
            let email = claims
                .email
                .filter(|e| !e.trim().is_empty())
                .ok_or(AuthError::MissingClaim("email"))?;
            let id = UserId::new(claims.sub).map_err(|_| AuthError::MissingClaim("sub"))?;
            let name = claims.name.or(claims.preferred_username).map(String::from);

            let user = AuthenticatedUser::new(id, email, name);
            Ok(match claims.picture {
                Some(picture) => user.with_picture(picture),
                None => user,
            })
        }
    }

    fn complete_claims() -> Claims {
        Claims {
            sub: "2f1c9a",
            email: Some("sam@example.org"),
            preferred_username: Some("sam"),
            picture: Some("https://cdn.example.org/sam.png"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn maps_claims_onto_the_user() {
        let validator = ClaimsTable::new(&[("tok", complete_claims())]);

        let user = validator.validate("tok").await.unwrap();

        assert_eq!(user.id.as_str(), "2f1c9a");
        assert_eq!(user.email, "sam@example.org");
        assert_eq!(user.display_name.as_deref(), Some("sam"));
        assert_eq!(user.picture.as_deref(), Some("https://cdn.example.org/sam.png"));
    }

    #[tokio::test]
    async fn name_claim_wins_over_preferred_username() {
        let claims = Claims {
            name: Some("Sam Rivera"),
            ..complete_claims()
        };
        let validator = ClaimsTable::new(&[("tok", claims)]);

        let user = validator.validate("tok").await.unwrap();

        assert_eq!(user.display_name.as_deref(), Some("Sam Rivera"));
    }

    #[tokio::test]
    async fn token_without_email_is_rejected() {
        let blank = Claims {
            email: Some("  "),
            ..complete_claims()
        };
        let absent = Claims {
            email: None,
            ..complete_claims()
        };
        let validator = ClaimsTable::new(&[("blank", blank), ("absent", absent)]);

        for token in ["blank", "absent"] {
            assert_eq!(
                validator.validate(token).await.unwrap_err(),
                AuthError::MissingClaim("email")
            );
        }
    }

    #[tokio::test]
    async fn expired_and_unknown_tokens_are_distinguished() {
        let expired = Claims {
            expired: true,
            ..complete_claims()
        };
        let validator = ClaimsTable::new(&[("old", expired)]);

        assert_eq!(validator.validate("old").await.unwrap_err(), AuthError::TokenExpired);
        assert_eq!(validator.validate("forged").await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn unreachable_issuer_is_transient() {
        let mut validator = ClaimsTable::new(&[("tok", complete_claims())]);
        validator.issuer_reachable = false;

        let err = validator.validate("tok").await.unwrap_err();

        assert!(err.is_transient());
    }

    #[test]
    fn usable_as_shared_trait_object() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
