//! Ollama chat gateway
//!
//! Sends each rendered prompt to `POST {base_url}/api/chat` as a system
//! message plus a user message, non-streaming.

use super::protocol::{ChatMessage, ChatOptions, ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use tutor_application::{GatewayError, LlmGateway};
use tutor_domain::{ModelReply, RenderedPrompt};

/// [`LlmGateway`] backed by a local or remote Ollama server
pub struct OllamaLlmGateway {
    model: String,
    base_url: String,
    temperature: f32,
    client: reqwest::Client,
}

impl OllamaLlmGateway {
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            temperature,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request(&self, prompt: &RenderedPrompt) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if !prompt.system.trim().is_empty() {
            messages.push(ChatMessage::new("system", prompt.system.clone()));
        }
        messages.push(ChatMessage::new("user", prompt.user.clone()));

        ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::ConnectionError(format!("{}: {}", self.base_url, e))
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }
}

/// Turn a decoded reply into the agent-facing shape
fn reply_from_response(response: ChatResponse) -> Result<ModelReply, GatewayError> {
    match response.message {
        Some(message) if !message.content.trim().is_empty() => {
            Ok(ModelReply::content(message.content))
        }
        _ => Err(GatewayError::EmptyResponse),
    }
}

#[async_trait]
impl LlmGateway for OllamaLlmGateway {
    async fn invoke(&self, prompt: &RenderedPrompt) -> Result<ModelReply, GatewayError> {
        let body = self.build_request(prompt);
        debug!(model = %self.model, messages = body.messages.len(), "Sending chat request");

        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Ollama returned error");
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_body
            )));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to parse response: {}", e)))?;

        reply_from_response(decoded)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
