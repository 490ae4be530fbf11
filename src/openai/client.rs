//! HTTP client for the chat completion endpoint

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::OpenAiConfig;

use super::error::{OpenAiError, OpenAiResult};
use super::models::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// Maximum error body size kept in error messages
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Chat completion client with a pooled HTTP connection
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http_client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client from configuration
    pub fn new(config: &OpenAiConfig) -> OpenAiResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Truncate error body on a UTF-8 boundary
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }

        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);

        format!("{}... (truncated)", &body[..truncate_at])
    }

    /// Runs a chat completion in JSON mode and returns the raw content of
    /// the first choice.
    pub async fn chat_json(&self, messages: Vec<ChatMessage>) -> OpenAiResult<String> {
        debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Sending chat request"
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self
            .http_client
            .post(self.config.chat_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = Self::truncate_error_body(response.text().await.unwrap_or_default());
            return Err(OpenAiError::ApiError { status, body });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(OpenAiError::EmptyResponse)?;

        debug!(response_len = content.len(), "Chat response received");

        Ok(content)
    }
}
