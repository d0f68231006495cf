//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the hosted models we use.
//!
//! ## Available Adapters
//!
//! - `GroqProvider` - Groq's OpenAI-compatible chat completions (primary for chat)
//! - `GeminiProvider` - Google Gemini `generateContent`
//! - `FailoverAIProvider` - Wrapper with automatic failover between providers
//! - `UnconfiguredProvider` - Always fails; used when no API key is set
//! - `MockAIProvider` - Configurable mock for testing

mod failover_provider;
mod gemini_provider;
mod groq_provider;
mod mock_provider;
mod transport;

pub use failover_provider::{
    events as ai_events, AIEventCallback, FailoverAIProvider, NoFallback, TracingEventCallback,
    UnconfiguredProvider,
};
pub use gemini_provider::{GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use groq_provider::{GroqConfig, GroqProvider, DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use transport::DEFAULT_RETRY_BASE_DELAY;
