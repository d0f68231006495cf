//! SendChatMessageHandler - One turn of the support companion conversation.
//!
//! # Flow
//!
//! 1. Validate and persist the user message
//! 2. Load the last `CONTEXT_WINDOW` messages (including the new one)
//! 3. Ask the chat provider for a reply, with the safety addendum if the
//!    message looks like a crisis
//! 4. On provider failure or an elapsed AI budget, reply with the fixed
//!    fallback text
//! 5. Persist the assistant reply

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::ai_budget::{complete_within, DEFAULT_AI_BUDGET};
use crate::domain::chat::{
    detect_crisis, system_prompt, ChatError, ChatMessage, ChatRole, CrisisResource,
    CONTEXT_WINDOW, CRISIS_RESOURCES, FALLBACK_REPLY,
};
use crate::domain::foundation::UserId;
use crate::ports::{
    AIProvider, ChatRepository, CompletionPurpose, CompletionRequest, Message, MessageRole,
    RequestMetadata,
};

const REPLY_MAX_TOKENS: u32 = 400;
const REPLY_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub user_id: UserId,
    pub content: String,
    pub trace_id: String,
}

#[derive(Debug, Clone)]
pub struct SendChatMessageResult {
    pub user_message: ChatMessage,
    pub reply: ChatMessage,
    /// True when the reply is the fixed fallback text.
    pub fallback: bool,
    /// Helplines to show when the message looked like a crisis.
    pub crisis_resources: Option<&'static [CrisisResource]>,
}

pub struct SendChatMessageHandler {
    repository: Arc<dyn ChatRepository>,
    ai_provider: Arc<dyn AIProvider>,
    ai_budget: Duration,
}

impl SendChatMessageHandler {
    pub fn new(repository: Arc<dyn ChatRepository>, ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            repository,
            ai_provider,
            ai_budget: DEFAULT_AI_BUDGET,
        }
    }

    pub fn with_ai_budget(mut self, budget: Duration) -> Self {
        self.ai_budget = budget;
        self
    }

    pub async fn handle(&self, cmd: SendChatMessageCommand) -> Result<SendChatMessageResult, ChatError> {
        let user_message = ChatMessage::from_user(cmd.user_id.clone(), &cmd.content)?;
        let crisis = detect_crisis(user_message.content());
        if crisis {
            tracing::warn!(trace_id = %cmd.trace_id, "Crisis language detected in chat message");
        }

        self.repository.append(&user_message).await?;

        let context = self
            .repository
            .recent(&cmd.user_id, CONTEXT_WINDOW as u32)
            .await?;

        let request = CompletionRequest::new(RequestMetadata::new(
            cmd.user_id.clone(),
            CompletionPurpose::CompanionChat,
            cmd.trace_id.clone(),
        ))
        .with_system_prompt(system_prompt(crisis))
        .with_messages(context.iter().map(to_prompt_message))
        .with_max_tokens(REPLY_MAX_TOKENS)
        .with_temperature(REPLY_TEMPERATURE);

        let outcome = complete_within(self.ai_provider.as_ref(), request, self.ai_budget).await;
        let (text, fallback) = match outcome {
            Ok(response) if !response.content.trim().is_empty() => {
                (response.content.trim().to_string(), false)
            }
            Ok(_) => {
                tracing::warn!(trace_id = %cmd.trace_id, "Empty chat reply, using fallback");
                (FALLBACK_REPLY.to_string(), true)
            }
            Err(err) => {
                tracing::warn!(error = %err, trace_id = %cmd.trace_id, "Chat provider failed, using fallback");
                (FALLBACK_REPLY.to_string(), true)
            }
        };

        let reply = ChatMessage::from_assistant(cmd.user_id, text);
        self.repository.append(&reply).await?;

        Ok(SendChatMessageResult {
            user_message,
            reply,
            fallback,
            crisis_resources: crisis.then_some(CRISIS_RESOURCES),
        })
    }
}

fn to_prompt_message(message: &ChatMessage) -> Message {
    let role = match message.role() {
        ChatRole::User => MessageRole::User,
        ChatRole::Assistant => MessageRole::Assistant,
    };
    Message::new(role, message.content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::InMemoryChatRepository;
    use crate::domain::chat::SAFETY_ADDENDUM;

    fn command(content: &str) -> SendChatMessageCommand {
        SendChatMessageCommand {
            user_id: UserId::new("user-1").unwrap(),
            content: content.to_string(),
            trace_id: "trace-1".to_string(),
        }
    }

    #[tokio::test]
    async fn stores_both_sides_of_the_turn() {
        let repo = Arc::new(InMemoryChatRepository::new());
        let ai = Arc::new(MockAIProvider::new().with_response("That sounds hard. Want to talk?"));
        let handler = SendChatMessageHandler::new(repo.clone(), ai);

        let result = handler.handle(command("Rough day today")).await.unwrap();

        assert!(!result.fallback);
        assert!(result.crisis_resources.is_none());
        assert_eq!(result.reply.content(), "That sounds hard. Want to talk?");
        let history = repo.recent(&UserId::new("user-1").unwrap(), 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role(), ChatRole::User);
        assert_eq!(history[1].role(), ChatRole::Assistant);
    }

    #[tokio::test]
    async fn sends_prior_context_to_provider() {
        let repo = Arc::new(InMemoryChatRepository::new());
        let ai = Arc::new(MockAIProvider::new());
        let handler = SendChatMessageHandler::new(repo, ai.clone());

        handler.handle(command("first")).await.unwrap();
        handler.handle(command("second")).await.unwrap();

        let call = ai.last_call().unwrap();
        let contents: Vec<&str> = call.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "Mock response", "second"]);
        assert_eq!(call.messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn provider_failure_returns_fallback() {
        let repo = Arc::new(InMemoryChatRepository::new());
        let ai = Arc::new(MockAIProvider::failing(MockError::Timeout { timeout_secs: 30 }));
        let handler = SendChatMessageHandler::new(repo.clone(), ai);

        let result = handler.handle(command("hello")).await.unwrap();

        assert!(result.fallback);
        assert_eq!(result.reply.content(), FALLBACK_REPLY);
        assert_eq!(repo.count_by_user(&UserId::new("user-1").unwrap()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn hung_provider_still_stores_a_fallback_reply() {
        let repo = Arc::new(InMemoryChatRepository::new());
        let ai = Arc::new(MockAIProvider::new().with_delay(Duration::from_secs(30)));
        let handler = SendChatMessageHandler::new(repo.clone(), ai)
            .with_ai_budget(Duration::from_millis(50));

        let result = handler.handle(command("are you there?")).await.unwrap();

        assert!(result.fallback);
        assert_eq!(result.reply.content(), FALLBACK_REPLY);
        let history = repo.recent(&UserId::new("user-1").unwrap(), 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role(), ChatRole::Assistant);
    }

    #[tokio::test]
    async fn crisis_message_adds_resources_and_safety_prompt() {
        let repo = Arc::new(InMemoryChatRepository::new());
        let ai = Arc::new(MockAIProvider::new());
        let handler = SendChatMessageHandler::new(repo, ai.clone());

        let result = handler.handle(command("I want to end my life")).await.unwrap();

        assert_eq!(result.crisis_resources, Some(CRISIS_RESOURCES));
        let prompt = ai.last_call().unwrap().system_prompt.unwrap();
        assert!(prompt.contains(SAFETY_ADDENDUM));
    }

    #[tokio::test]
    async fn blank_message_is_rejected_before_storage() {
        let repo = Arc::new(InMemoryChatRepository::new());
        let ai = Arc::new(MockAIProvider::new());
        let handler = SendChatMessageHandler::new(repo.clone(), ai.clone());

        let result = handler.handle(command("   ")).await;

        assert!(matches!(result, Err(ChatError::ValidationFailed { .. })));
        assert_eq!(ai.call_count(), 0);
        assert_eq!(repo.count_by_user(&UserId::new("user-1").unwrap()).await.unwrap(), 0);
    }
}
