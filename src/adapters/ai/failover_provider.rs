//! Failover AI Provider - Wrapper that provides automatic failover between providers.
//!
//! When the primary provider fails with a transient error (rate limit,
//! outage, network, timeout), the request is replayed against the secondary
//! provider if one is configured. Chat uses Groq as primary and Gemini as
//! fallback.
//!
//! # Example
//!
//! ```ignore
//! let primary = GroqProvider::new(groq_config)?;
//! let fallback = GeminiProvider::new(gemini_config)?;
//!
//! let provider = FailoverAIProvider::new(primary).with_fallback(fallback);
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Events emitted while serving completions.
pub mod events {
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::ports::CompletionPurpose;

    /// A completion finished and consumed tokens.
    #[derive(Debug, Clone)]
    pub struct TokensUsed {
        pub user_id: UserId,
        pub purpose: CompletionPurpose,
        pub provider: String,
        pub model: String,
        pub prompt_tokens: u32,
        pub completion_tokens: u32,
        pub trace_id: String,
        pub occurred_at: Timestamp,
    }

    impl TokensUsed {
        pub fn total_tokens(&self) -> u32 {
            self.prompt_tokens + self.completion_tokens
        }
    }

    /// The primary provider failed and the fallback was tried.
    #[derive(Debug, Clone)]
    pub struct ProviderFallback {
        pub primary_provider: String,
        pub fallback_provider: String,
        pub reason: String,
        pub trace_id: String,
        pub occurred_at: Timestamp,
    }
}

/// Callback for receiving AI events (tokens used, failover).
pub trait AIEventCallback: Send + Sync {
    fn on_tokens_used(&self, event: events::TokensUsed);

    fn on_fallback(&self, event: events::ProviderFallback);
}

/// Writes AI events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventCallback;

impl AIEventCallback for TracingEventCallback {
    fn on_tokens_used(&self, event: events::TokensUsed) {
        tracing::info!(
            user_id = %event.user_id,
            purpose = event.purpose.as_str(),
            provider = %event.provider,
            model = %event.model,
            total_tokens = event.total_tokens(),
            trace_id = %event.trace_id,
            "AI tokens used"
        );
    }

    fn on_fallback(&self, event: events::ProviderFallback) {
        tracing::warn!(
            primary = %event.primary_provider,
            fallback = %event.fallback_provider,
            reason = %event.reason,
            trace_id = %event.trace_id,
            "AI provider failover"
        );
    }
}

/// AI provider wrapper with automatic failover support.
pub struct FailoverAIProvider<P: AIProvider, F: AIProvider = NoFallback> {
    primary: P,
    fallback: Option<F>,
    event_callback: Arc<dyn AIEventCallback>,
}

/// Marker type for when no fallback is configured.
pub struct NoFallback;

#[async_trait]
impl AIProvider for NoFallback {
    async fn complete(&self, _: CompletionRequest) -> Result<CompletionResponse, AIError> {
        Err(AIError::NotConfigured("no fallback provider".to_string()))
    }

    fn estimate_tokens(&self, _: &str) -> u32 {
        0
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("none", "none", 0)
    }
}

impl<P: AIProvider> FailoverAIProvider<P, NoFallback> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: None,
            event_callback: Arc::new(TracingEventCallback),
        }
    }

    /// Adds a fallback provider.
    pub fn with_fallback<F: AIProvider>(self, fallback: F) -> FailoverAIProvider<P, F> {
        FailoverAIProvider {
            primary: self.primary,
            fallback: Some(fallback),
            event_callback: self.event_callback,
        }
    }
}

impl<P: AIProvider, F: AIProvider> FailoverAIProvider<P, F> {
    pub fn with_event_callback(mut self, callback: Arc<dyn AIEventCallback>) -> Self {
        self.event_callback = callback;
        self
    }

    fn emit_tokens_used(
        &self,
        request: &CompletionRequest,
        response: &CompletionResponse,
        served_by: ProviderInfo,
    ) {
        self.event_callback.on_tokens_used(events::TokensUsed {
            user_id: request.metadata.user_id.clone(),
            purpose: request.metadata.purpose,
            provider: served_by.name,
            model: response.model.clone(),
            prompt_tokens: response.usage.prompt_tokens,
            completion_tokens: response.usage.completion_tokens,
            trace_id: request.metadata.trace_id.clone(),
            occurred_at: crate::domain::foundation::Timestamp::now(),
        });
    }

    fn emit_fallback(&self, fallback: &F, reason: &AIError, request: &CompletionRequest) {
        self.event_callback.on_fallback(events::ProviderFallback {
            primary_provider: self.primary.provider_info().name,
            fallback_provider: fallback.provider_info().name,
            reason: reason.to_string(),
            trace_id: request.metadata.trace_id.clone(),
            occurred_at: crate::domain::foundation::Timestamp::now(),
        });
    }
}

#[async_trait]
impl<P: AIProvider + 'static, F: AIProvider + 'static> AIProvider for FailoverAIProvider<P, F> {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        match self.primary.complete(request.clone()).await {
            Ok(response) => {
                self.emit_tokens_used(&request, &response, self.primary.provider_info());
                Ok(response)
            }
            Err(err) if err.is_retryable() => match self.fallback.as_ref() {
                Some(fallback) => {
                    self.emit_fallback(fallback, &err, &request);
                    let response = fallback.complete(request.clone()).await?;
                    self.emit_tokens_used(&request, &response, fallback.provider_info());
                    Ok(response)
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        self.primary.estimate_tokens(text)
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}

/// Stand-in used when no provider has an API key. Every call fails, which
/// sends callers down their hardcoded fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredProvider;

#[async_trait]
impl AIProvider for UnconfiguredProvider {
    async fn complete(&self, _: CompletionRequest) -> Result<CompletionResponse, AIError> {
        Err(AIError::NotConfigured(
            "no AI provider API key is configured".to_string(),
        ))
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("unconfigured", "none", 0)
    }
}
