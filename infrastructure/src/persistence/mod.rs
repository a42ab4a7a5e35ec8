//! Storage adapters for conversations and live sessions

mod json_store;
mod session_store;

pub use json_store::JsonConversationStore;
pub use session_store::InMemorySessionStore;
