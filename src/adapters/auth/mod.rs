//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `oidc` - Production JWKS validation against any OpenID Connect issuer
//! - `mock` - Token table for tests and local development

mod mock;
mod oidc;

pub use mock::MockSessionValidator;
pub use oidc::{OidcConfig, OidcSessionValidator};
