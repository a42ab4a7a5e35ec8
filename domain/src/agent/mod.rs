//! Agent domain
//!
//! - [`role::AgentRole`]: tutor, expert and teacher
//! - [`mode_config::ModeConfig`]: language and tutoring mode shared by all agents
//! - [`output::AgentOutput`]: one agent's keyed reply and its text unwrapping

pub mod mode_config;
pub mod output;
pub mod role;
