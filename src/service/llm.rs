//! Chat-completion client for the Groq API
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint. The
//! [`ChatClient`] trait is the seam the analysis service depends on, so tests
//! can substitute a scripted client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::LlmSettings;

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// A single prompt message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Output format hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Request body for one chat completion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Build a non-streaming JSON-mode request using the configured sampling parameters
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>, settings: &LlmSettings) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_completion_tokens: settings.max_completion_tokens,
            stream: false,
            response_format: Some(ResponseFormat::json_object()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("Missing Groq API key. Set GROQ_API_KEY in your environment.")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Groq API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode completion response: {0}")]
    Decode(String),
}

/// Anything that can turn a chat request into generated text
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the first choice's message content, `None` when the model produced no text
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, LlmError>;
}

/// Groq chat-completion client
pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GroqClient {
    /// Create a new client
    ///
    /// A missing key is not an error here; each call fails with
    /// [`LlmError::MissingApiKey`] instead so the rest of the server stays up.
    pub fn new(api_key: Option<String>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatClient for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let url = self.completions_url();

        tracing::debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
