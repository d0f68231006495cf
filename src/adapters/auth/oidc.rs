//! OIDC adapter for JWT validation.
//!
//! This adapter implements the `SessionValidator` port against any OpenID
//! Connect issuer (Google, Auth0, Keycloak...). It validates JWTs by:
//!
//! 1. Discovering the JWKS URL from `/.well-known/openid-configuration`
//! 2. Validating the JWT signature against the published public keys
//! 3. Validating issuer, audience, and expiry claims
//! 4. Mapping claims to the domain `AuthenticatedUser` type
//!
//! Keys are cached; an unknown `kid` forces one refresh so rotated keys are
//! picked up without waiting for the cache to expire.
//!
//! # Example
//!
//! ```ignore
//! let config = OidcConfig::new("https://accounts.google.com", "my-client-id");
//! let validator = OidcSessionValidator::new(config)?;
//! let user = validator.validate("eyJ...").await?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

const DEFAULT_JWKS_CACHE: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Issuer URL, used for discovery and `iss` validation.
    pub issuer_url: String,

    /// Expected `aud` claim (usually the OAuth client id).
    pub audience: String,

    /// How long to cache JWKS before refetching.
    pub jwks_cache_duration: Duration,
}

impl OidcConfig {
    pub fn new(issuer_url: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: audience.into(),
            jwks_cache_duration: DEFAULT_JWKS_CACHE,
        }
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = duration;
        self
    }

    fn discovery_url(&self) -> String {
        format!(
            "{}/.well-known/openid-configuration",
            self.issuer_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    jwks_uri: String,
}

/// Claims we read from ID/access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct OidcClaims {
    sub: String,
    iss: String,
    #[serde(default)]
    aud: Audience,
    exp: i64,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

impl OidcClaims {
    fn into_user(self) -> Result<AuthenticatedUser, AuthError> {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(AuthError::MissingClaim("email"))?;

        let user_id = UserId::new(&self.sub).map_err(|_| AuthError::MissingClaim("sub"))?;

        let user = AuthenticatedUser::new(user_id, email, self.name.or(self.preferred_username));
        Ok(match self.picture {
            Some(picture) => user.with_picture(picture),
            None => user,
        })
    }
}

struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
}

impl JwksCache {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }
}

/// Production `SessionValidator` backed by an OIDC issuer's JWKS.
pub struct OidcSessionValidator {
    config: OidcConfig,
    http_client: reqwest::Client,
    jwks_uri: RwLock<Option<String>>,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl OidcSessionValidator {
    /// Keys are fetched lazily on the first validation, not here.
    pub fn new(config: OidcConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            jwks_uri: RwLock::new(None),
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, AuthError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!(url, error = %e, "OIDC request failed");
            AuthError::service_unavailable(format!("Failed to reach {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(url, %status, "OIDC endpoint returned an error");
            return Err(AuthError::service_unavailable(format!(
                "{} returned {}",
                url, status
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!(url, error = %e, "OIDC response unreadable");
            AuthError::service_unavailable(format!("Failed to parse {}: {}", url, e))
        })
    }

    async fn resolve_jwks_uri(&self) -> Result<String, AuthError> {
        if let Some(uri) = self.jwks_uri.read().await.clone() {
            return Ok(uri);
        }
        let doc: DiscoveryDocument = self.get_json(&self.config.discovery_url()).await?;
        *self.jwks_uri.write().await = Some(doc.jwks_uri.clone());
        Ok(doc.jwks_uri)
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let uri = self.resolve_jwks_uri().await?;
        let jwks: JwkSet = self.get_json(&uri).await?;
        tracing::debug!(keys = jwks.keys.len(), "Fetched JWKS");

        *self.jwks_cache.write().await = Some(JwksCache {
            jwks: jwks.clone(),
            fetched_at: Instant::now(),
        });
        Ok(jwks)
    }

    /// Cached JWKS unless expired or `force_refresh` is set.
    async fn get_jwks(&self, force_refresh: bool) -> Result<JwkSet, AuthError> {
        if !force_refresh {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired(self.config.jwks_cache_duration) {
                    return Ok(cached.jwks.clone());
                }
            }
        }
        self.fetch_jwks().await
    }

    fn find_decoding_key(
        header: &Header,
        jwks: &JwkSet,
    ) -> Result<Option<(DecodingKey, Algorithm)>, AuthError> {
        let kid = header.kid.as_ref().ok_or_else(|| {
            tracing::warn!("JWT missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let Some(jwk) = jwks.find(kid) else {
            return Ok(None);
        };

        use jsonwebtoken::jwk::KeyAlgorithm;
        let algorithm = match jwk.common.key_algorithm {
            Some(KeyAlgorithm::RS256) | None => Algorithm::RS256,
            Some(KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(KeyAlgorithm::ES256) => Algorithm::ES256,
            Some(KeyAlgorithm::ES384) => Algorithm::ES384,
            Some(other) => {
                tracing::warn!(algorithm = ?other, "Unsupported JWK algorithm");
                return Err(AuthError::InvalidToken);
            }
        };

        let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!(error = %e, "Failed to create decoding key");
            AuthError::InvalidToken
        })?;

        Ok(Some((decoding_key, algorithm)))
    }

    fn decode_claims(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<TokenData<OidcClaims>, AuthError> {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer_url]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);

        decode::<OidcClaims>(token, decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    tracing::warn!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            }
        })
    }
}

#[async_trait]
impl SessionValidator for OidcSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "Failed to decode JWT header");
            AuthError::InvalidToken
        })?;

        let jwks = self.get_jwks(false).await?;
        let key = match Self::find_decoding_key(&header, &jwks)? {
            Some(key) => key,
            None => {
                // Possibly a rotated key; refresh once.
                let refreshed = self.get_jwks(true).await?;
                Self::find_decoding_key(&header, &refreshed)?.ok_or_else(|| {
                    tracing::warn!(kid = ?header.kid, "No matching JWK");
                    AuthError::InvalidToken
                })?
            }
        };

        let claims = self.decode_claims(token, &key.0, key.1)?.claims;

        if claims.iss != self.config.issuer_url || !claims.aud.contains(&self.config.audience) {
            return Err(AuthError::InvalidToken);
        }

        claims.into_user()
    }
}

impl std::fmt::Debug for OidcSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
