//! Gemini Provider - Implementation of AIProvider for Google's Generative Language API.
//!
//! Uses the `models/{model}:generateContent` endpoint. Gemini has no system
//! role inside `contents`; the system prompt travels in `systemInstruction`
//! and assistant turns are sent with role `model`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::transport;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_base_delay: transport::DEFAULT_RETRY_BASE_DELAY,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(&self, request: &CompletionRequest) -> GenerateRequest {
        // Inline system messages are folded into the system instruction.
        let mut system_parts: Vec<Part> = request
            .system_prompt
            .iter()
            .map(|p| Part { text: p.clone() })
            .collect();
        let mut contents = Vec::with_capacity(request.messages.len());

        for msg in &request.messages {
            let role = match msg.role {
                MessageRole::System => {
                    system_parts.push(Part {
                        text: msg.content.clone(),
                    });
                    continue;
                }
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            contents.push(Content {
                role: Some(role.to_string()),
                parts: vec![Part {
                    text: msg.content.clone(),
                }],
            });
        }

        let generation_config = if request.max_tokens.is_some() || request.temperature.is_some() {
            Some(GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            })
        } else {
            None
        };

        GenerateRequest {
            system_instruction: (!system_parts.is_empty()).then(|| Content {
                role: None,
                parts: system_parts,
            }),
            contents,
            generation_config,
        }
    }

    async fn send_request(&self, body: &GenerateRequest) -> Result<Response, AIError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| transport::map_send_error(e, self.config.timeout))
    }

    async fn attempt(&self, body: &GenerateRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(body).await?;
        let response = transport::check_status(response).await?;
        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;
        parsed.into_completion(&self.config.model)
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let body = self.to_gemini_request(&request);
        transport::with_retries(self.config.max_retries, self.config.retry_base_delay, || {
            self.attempt(&body)
        })
        .await
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        transport::estimate_tokens(text)
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("gemini-1.5-pro") => 2_097_152,
            m if m.starts_with("gemini-1.5") || m.starts_with("gemini-2") => 1_048_576,
            _ => 32_768,
        };
        ProviderInfo::new("gemini", &self.config.model, max_context)
    }
}

// ----- Generative Language API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl GenerateResponse {
    fn into_completion(self, configured_model: &str) -> Result<CompletionResponse, AIError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AIError::content_filtered(reason));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No candidates in response"))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::ContentFilter
            }
            _ => FinishReason::Stop,
        };

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if content.trim().is_empty() && finish_reason == FinishReason::ContentFilter {
            return Err(AIError::content_filtered("response blocked by safety settings"));
        }

        let usage = self
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage,
            model: self
                .model_version
                .unwrap_or_else(|| configured_model.to_string()),
            finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::{CompletionPurpose, Message, RequestMetadata};

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new("test-key")).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(
            UserId::new("u").unwrap(),
            CompletionPurpose::AssessmentInsight,
            "t",
        ))
    }

    #[test]
    fn url_includes_model() {
        assert_eq!(
            provider().generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn request_uses_system_instruction_and_model_role() {
        let req = request()
            .with_system_prompt("be kind")
            .with_messages(vec![
                Message::user("hello"),
                Message::assistant("hi there"),
                Message::system("stay brief"),
            ])
            .with_temperature(0.4);

        let json = serde_json::to_value(provider().to_gemini_request(&req)).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be kind");
        assert_eq!(json["systemInstruction"]["parts"][1]["text"], "stay brief");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"].as_array().unwrap().len(), 2);
        assert_eq!(json["contents"][1]["role"], "model");
        assert!(json["generationConfig"]["temperature"].as_f64().is_some());
        assert!(json["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn no_generation_config_when_unset() {
        let json =
            serde_json::to_value(provider().to_gemini_request(&request().with_message(MessageRole::User, "x")))
                .unwrap();
        assert!(json.get("generationConfig").is_none());
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn response_joins_parts() {
        let raw = r#"{
            "candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"friend"}]},"finishReason":"STOP"}],
            "usageMetadata":{"promptTokenCount":4,"candidatesTokenCount":2,"totalTokenCount":6},
            "modelVersion":"gemini-1.5-flash-002"
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let completion = parsed.into_completion(DEFAULT_GEMINI_MODEL).unwrap();

        assert_eq!(completion.content, "Hello friend");
        assert_eq!(completion.usage.total_tokens, 6);
        assert_eq!(completion.model, "gemini-1.5-flash-002");
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            parsed.into_completion(DEFAULT_GEMINI_MODEL),
            Err(AIError::ContentFiltered { .. })
        ));
    }

    #[test]
    fn safety_stop_without_text_is_content_filtered() {
        let raw = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            parsed.into_completion(DEFAULT_GEMINI_MODEL),
            Err(AIError::ContentFiltered { .. })
        ));
    }
}
