//! Authentication configuration
//!
//! Tokens are issued by an external OpenID Connect provider. We only need
//! the issuer (for discovery and `iss` checks) and the expected audience.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OIDC issuer URL, e.g. `https://login.example.com`
    pub issuer_url: String,

    /// Expected `aud` claim
    pub audience: String,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_secs")]
    pub jwks_cache_secs: u64,
}

impl AuthConfig {
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_secs)
    }

    /// In production the issuer must be HTTPS; development also allows
    /// plain HTTP for a local identity provider.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.issuer_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MINDSPACE__AUTH__ISSUER_URL"));
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MINDSPACE__AUTH__AUDIENCE"));
        }
        if *environment == Environment::Production && !self.issuer_url.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: String::new(),
            audience: String::new(),
            jwks_cache_secs: default_jwks_cache_secs(),
        }
    }
}

fn default_jwks_cache_secs() -> u64 {
    3600
}
