//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MINDSPACE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use mindspace::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! println!("Server running on {}", config.server.socket_addr()?);
//! # Ok(())
//! # }
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;
mod storage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;
use std::time::Duration;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (OIDC issuer)
    pub auth: AuthConfig,

    /// AI provider configuration (Groq/Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Upload storage
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MINDSPACE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MINDSPACE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MINDSPACE__DATABASE__URL=...` -> `database.url = ...`
    /// - `MINDSPACE__AI__GROQ_API_KEY=...` -> `ai.groq_api_key = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MINDSPACE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        if self.ai.worst_case_duration() > self.ai_budget() {
            return Err(ValidationError::AiSlowerThanRequestTimeout);
        }
        self.storage.validate()?;
        Ok(())
    }

    /// How long request handlers wait for an AI reply before using their
    /// fallback. Three quarters of the request timeout, so the fallback is
    /// stored and returned before the timeout layer answers 408.
    pub fn ai_budget(&self) -> Duration {
        self.server.request_timeout() * 3 / 4
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MINDSPACE__DATABASE__URL",
        "MINDSPACE__AUTH__ISSUER_URL",
        "MINDSPACE__AUTH__AUDIENCE",
        "MINDSPACE__AI__GROQ_API_KEY",
        "MINDSPACE__AI__GEMINI_API_KEY",
        "MINDSPACE__AI__TIMEOUT_SECS",
        "MINDSPACE__AI__MAX_RETRIES",
        "MINDSPACE__SERVER__REQUEST_TIMEOUT_SECS",
        "MINDSPACE__SERVER__PORT",
        "MINDSPACE__SERVER__ENVIRONMENT",
        "MINDSPACE__STORAGE__MAX_UPLOAD_BYTES",
    ];

    fn set_minimal_env() {
        env::set_var("MINDSPACE__DATABASE__URL", "postgres://test@localhost/test");
        env::set_var("MINDSPACE__AUTH__ISSUER_URL", "https://login.example.com");
        env::set_var("MINDSPACE__AUTH__AUDIENCE", "mindspace-api");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, "postgres://test@localhost/test");
        assert_eq!(config.auth.audience, "mindspace-api");
        assert!(!config.ai.has_any_provider());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("MINDSPACE__SERVER__PORT", "3000"),
            ("MINDSPACE__SERVER__ENVIRONMENT", "production"),
            ("MINDSPACE__AI__GROQ_API_KEY", "gsk_test"),
            ("MINDSPACE__STORAGE__MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.ai.groq_key(), Some("gsk_test"));
        assert_eq!(config.storage.max_upload_bytes, 1024);
    }

    #[test]
    fn test_default_ai_failover_fits_inside_request_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("MINDSPACE__AI__GROQ_API_KEY", "gsk_test"),
            ("MINDSPACE__AI__GEMINI_API_KEY", "g_test"),
        ])
        .unwrap();

        assert_eq!(config.ai_budget(), Duration::from_secs(45));
        assert!(config.ai.worst_case_duration() <= config.ai_budget());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ai_settings_outlasting_request_timeout_are_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("MINDSPACE__AI__GROQ_API_KEY", "gsk_test"),
            ("MINDSPACE__AI__TIMEOUT_SECS", "30"),
            ("MINDSPACE__AI__MAX_RETRIES", "2"),
        ])
        .unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::AiSlowerThanRequestTimeout)
        );
    }

    #[test]
    fn test_slow_ai_is_fine_without_keys() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("MINDSPACE__AI__TIMEOUT_SECS", "120"),
            ("MINDSPACE__SERVER__REQUEST_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_database_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MINDSPACE__AUTH__ISSUER_URL", "https://login.example.com");
        env::set_var("MINDSPACE__AUTH__AUDIENCE", "mindspace-api");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
