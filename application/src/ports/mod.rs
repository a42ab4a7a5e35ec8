//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod agent_logger;
pub mod conversation_store;
pub mod llm_gateway;
pub mod progress;
pub mod session_store;
