//! Logging infrastructure for the agent transcript.
//!
//! Both adapters implement the [`AgentLogger`](tutor_application::AgentLogger)
//! port: [`TracingAgentLogger`] prints banners through `tracing`,
//! [`JsonlAgentLogger`] appends JSON lines to a file.

mod jsonl_logger;
mod tracing_logger;

pub use jsonl_logger::JsonlAgentLogger;
pub use tracing_logger::TracingAgentLogger;
