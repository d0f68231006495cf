//! Time limit for AI calls made while serving a request.
//!
//! Provider adapters retry and fail over on their own, so a hung upstream can
//! outlast the HTTP request. Handlers wrap each call in a budget shorter than
//! the request timeout and treat an elapsed budget as a provider failure.

use std::time::Duration;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse};

/// Budget used when the caller does not configure one.
pub const DEFAULT_AI_BUDGET: Duration = Duration::from_secs(45);

/// Runs one completion, giving up with [`AIError::Timeout`] once `budget` elapses.
pub async fn complete_within(
    provider: &dyn AIProvider,
    request: CompletionRequest,
    budget: Duration,
) -> Result<CompletionResponse, AIError> {
    match tokio::time::timeout(budget, provider.complete(request)).await {
        Ok(result) => result,
        Err(_) => Err(AIError::Timeout {
            timeout_secs: budget.as_secs().min(u64::from(u32::MAX)) as u32,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::foundation::UserId;
    use crate::ports::{CompletionPurpose, RequestMetadata};

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(
            UserId::new("user-1").unwrap(),
            CompletionPurpose::CompanionChat,
            "trace-1",
        ))
    }

    #[tokio::test]
    async fn returns_reply_inside_budget() {
        let provider = MockAIProvider::new().with_response("hi");

        let response = complete_within(&provider, request(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(response.content, "hi");
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let provider = MockAIProvider::new().with_delay(Duration::from_secs(30));

        let result = complete_within(&provider, request(), Duration::from_millis(50)).await;

        assert!(matches!(result, Err(AIError::Timeout { .. })));
        assert_eq!(provider.call_count(), 1);
    }
}
