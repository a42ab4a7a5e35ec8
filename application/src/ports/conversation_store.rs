//! Conversation persistence port
//!
//! The store is a sink written after each turn. Workflows never read it.

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::{Conversation, ConversationSummary};

/// Errors from a conversation store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for tutoring conversations
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Write the conversation, replacing any earlier copy with the same id
    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError>;

    /// Read a conversation by id
    async fn load(&self, id: &str) -> Result<Conversation, StoreError>;

    /// Summaries of stored conversations, newest first
    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError>;
}
