//! LLM Gateway port
//!
//! Defines the interface for communicating with the language model backend.

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::{ModelReply, RenderedPrompt};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// One call renders one reply. Agents never retry; a failure here aborts
/// the running workflow. Implementations (adapters) live in the
/// infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a rendered prompt and wait for the model's reply
    async fn invoke(&self, prompt: &RenderedPrompt) -> Result<ModelReply, GatewayError>;

    /// Backend model identifier, for display
    fn model_name(&self) -> &str {
        "unknown"
    }
}
