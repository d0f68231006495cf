//! AI provider configuration
//!
//! Both providers are optional. With no keys at all the server still runs;
//! assessments and chat fall back to their canned content.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::DEFAULT_RETRY_BASE_DELAY;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Google Generative Language API key
    pub gemini_api_key: Option<Secret<String>>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Groq API key
    pub groq_api_key: Option<Secret<String>>,

    #[serde(default = "default_groq_model")]
    pub groq_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The Gemini key, if one is set and non-empty.
    pub fn gemini_key(&self) -> Option<&str> {
        non_empty(self.gemini_api_key.as_ref())
    }

    /// The Groq key, if one is set and non-empty.
    pub fn groq_key(&self) -> Option<&str> {
        non_empty(self.groq_api_key.as_ref())
    }

    pub fn has_any_provider(&self) -> bool {
        self.gemini_key().is_some() || self.groq_key().is_some()
    }

    /// Longest a single completion can take before every configured provider
    /// has given up: each provider makes `1 + max_retries` attempts of up to
    /// `timeout` with doubling backoff between them, and failover runs the
    /// providers one after another.
    pub fn worst_case_duration(&self) -> Duration {
        let providers =
            u32::from(self.gemini_key().is_some()) + u32::from(self.groq_key().is_some());
        let retries = self.max_retries.min(16);
        let attempts = self.timeout() * (retries + 1);
        let backoff = DEFAULT_RETRY_BASE_DELAY * ((1u32 << retries) - 1);
        (attempts + backoff) * providers
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > 10 {
            return Err(ValidationError::TooManyRetries);
        }
        Ok(())
    }
}

fn non_empty(key: Option<&Secret<String>>) -> Option<&str> {
    key.map(|k| k.expose_secret().as_str())
        .filter(|k| !k.trim().is_empty())
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            groq_api_key: None,
            groq_model: default_groq_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_gemini_model() -> String {
    crate::adapters::ai::DEFAULT_GEMINI_MODEL.to_string()
}

fn default_groq_model() -> String {
    crate::adapters::ai::DEFAULT_GROQ_MODEL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries, 1);
        assert!(!config.has_any_provider());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = AiConfig {
            groq_api_key: Some(Secret::new("  ".to_string())),
            gemini_api_key: Some(Secret::new("g-key".to_string())),
            ..Default::default()
        };
        assert_eq!(config.groq_key(), None);
        assert_eq!(config.gemini_key(), Some("g-key"));
        assert!(config.has_any_provider());
    }

    #[test]
    fn test_keys_are_redacted_in_debug() {
        let config = AiConfig {
            groq_api_key: Some(Secret::new("gsk_live_secret".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("gsk_live_secret"));
    }

    #[test]
    fn test_worst_case_counts_retries_backoff_and_failover() {
        let none = AiConfig {
            timeout_secs: 30,
            max_retries: 2,
            ..Default::default()
        };
        assert_eq!(none.worst_case_duration(), Duration::ZERO);

        let single = AiConfig {
            groq_api_key: Some(Secret::new("gsk".to_string())),
            ..none.clone()
        };
        // 3 attempts of 30s plus 1s and 2s of backoff
        assert_eq!(single.worst_case_duration(), Duration::from_secs(93));

        let both = AiConfig {
            gemini_api_key: Some(Secret::new("g-key".to_string())),
            ..single
        };
        assert_eq!(both.worst_case_duration(), Duration::from_secs(186));
    }

    #[test]
    fn test_validation_rejects_bad_limits() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));

        let config = AiConfig {
            max_retries: 11,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::TooManyRetries));
    }
}
