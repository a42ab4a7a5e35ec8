//! Ollama language model adapter

mod gateway;
mod protocol;

pub use gateway::OllamaLlmGateway;
