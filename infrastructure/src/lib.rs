//! Infrastructure layer for agent-tutor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Ollama gateway, agent transcript
//! loggers, conversation and session stores, plus configuration
//! file loading.

pub mod config;
pub mod logging;
pub mod ollama;
pub mod persistence;

// Re-export commonly used types
pub use config::{
    AgentLogSink, ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig,
    FileModelConfig, FileOrchestrationConfig, FileOutputConfig, FileTutorConfig,
};
pub use logging::{JsonlAgentLogger, TracingAgentLogger};
pub use ollama::OllamaLlmGateway;
pub use persistence::{InMemorySessionStore, JsonConversationStore};
