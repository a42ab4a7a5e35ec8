//! Prompt domain
//!
//! Templates for each tutoring agent and the `{field}` rendering that turns
//! an agent input into a prompt.

pub mod agent;
mod template;

pub use agent::AgentPromptTemplate;
pub use template::{PromptSection, PromptTemplate, RenderedPrompt};
