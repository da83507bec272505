//! Completion service client
//!
//! [`CompletionService`] is the seam between the analysis tools and the
//! external text-generation API. [`OpenAiClient`] talks to any
//! OpenAI-compatible `/chat/completions` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::CompletionConfig;
use crate::error::{AnalyzeError, Result};
use crate::prompt::ChatMessage;

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send the messages and return the text of the first choice
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if it has any
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

/// Client for an OpenAI-compatible chat completions API
pub struct OpenAiClient {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        if config.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(AnalyzeError::Config(
                "Completion API key not configured. Set OPENAI_API_KEY or completion.api_key in the config file".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(model = %self.config.model, url = %self.endpoint(), "requesting completion");

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "completion request failed");
            return Err(AnalyzeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed.into_content().ok_or(AnalyzeError::EmptyCompletion)
    }
}

/// Stand-in used when no real client could be built
///
/// Every request fails with the configuration error that prevented the
/// client from being created; tools that never call the service keep working.
pub struct UnavailableCompletion {
    reason: String,
}

impl UnavailableCompletion {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CompletionService for UnavailableCompletion {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        Err(AnalyzeError::Config(self.reason.clone()))
    }
}
