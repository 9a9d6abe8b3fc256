//! Chat-completion backend
//!
//! [`ChatBackend`] is the seam between the engine and the hosted LLM
//! API. [`OpenAiBackend`] implements it against an OpenAI-compatible
//! `/v1/chat/completions` endpoint. The call is awaited without
//! cancellation support and without a client-side timeout; failures are
//! surfaced once and never retried.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AssistError, Result};

/// One completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub api_key: String,
}

/// The engine's view of a chat-completion service
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one completion and return the assistant message text
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

// ---------------------------------------------------------------------
// OpenAI-compatible HTTP backend
// ---------------------------------------------------------------------

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WireErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Backend speaking the OpenAI chat-completions wire format
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
}

impl Default for OpenAiBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OpenAiBackend {
    /// Create a backend against a base URL (no trailing slash)
    ///
    /// The base URL is overridable for self-hosted compatible endpoints.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let body = WireRequest {
            model: &request.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: &request.system,
                },
                WireMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        info!(
            "📡 Sending completion request: model={}, prompt_len={}",
            request.model,
            request.user.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!("Completion error body: {}", text);

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(AssistError::InvalidApiKey);
            }
            if let Ok(body) = serde_json::from_str::<WireErrorBody>(&text) {
                match body.error.code.as_deref() {
                    Some("invalid_api_key") => return Err(AssistError::InvalidApiKey),
                    Some("model_not_found") => {
                        return Err(AssistError::UnknownModel(request.model))
                    }
                    _ => {
                        return Err(AssistError::RequestFailed(
                            body.error
                                .message
                                .unwrap_or_else(|| format!("HTTP {}", status)),
                        ))
                    }
                }
            }
            return Err(AssistError::RequestFailed(format!("HTTP {}", status)));
        }

        let parsed: WireResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AssistError::EmptyCompletion)
    }
}
