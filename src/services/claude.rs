//! Anthropic Messages API client
//!
//! Minimal reqwest client for the chat endpoint. When no API key is
//! configured the caller is expected to fall back to the rendered
//! context summary instead of calling out.

use serde::{Deserialize, Serialize};

use crate::{
    config::LlmConfig,
    error::{AppError, AppResult},
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

impl ClaudeClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// True when an API key is configured and the client can be used.
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Send one user turn with a system prompt and return the text of
    /// the first content block.
    pub async fn complete(&self, system: &str, user_message: &str) -> AppResult<String> {
        if !self.is_configured() {
            return Err(AppError::Llm("no API key configured".to_string()));
        }

        let request = MessageRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: user_message,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Anthropic API returned an error");
            return Err(AppError::Llm(format!("API returned {}", status)));
        }

        let parsed: MessageResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("malformed response: {}", e)))?;

        parsed
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text)
            .ok_or_else(|| AppError::Llm("response contained no text block".to_string()))
    }
}
