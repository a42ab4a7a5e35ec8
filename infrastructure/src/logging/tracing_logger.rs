//! Agent transcript through `tracing`.

use tracing::info;
use tutor_application::{AgentCall, AgentLogger};

const RULE_WIDTH: usize = 60;

/// Logs each agent call as a banner at `info` level.
///
/// ```text
/// ============================================================
/// Agent: tutor_agent
/// Inputs: user_input, conversation_history
/// User: fix my off-by-one loop
/// ============================================================
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAgentLogger;

impl TracingAgentLogger {
    pub fn new() -> Self {
        Self
    }

    fn banner(call: &AgentCall<'_>) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            format!("Agent: {}", call.agent_name),
            format!("Inputs: {}", call.input_keys.join(", ")),
        ];
        if let Some(preview) = &call.user_preview {
            lines.push(format!("User: {}", preview));
        }
        lines.push(rule);
        lines.join("\n")
    }
}

impl AgentLogger for TracingAgentLogger {
    fn log_agent(&self, call: &AgentCall<'_>) {
        info!(
            agent = call.agent_name,
            response_chars = call.output.text().chars().count(),
            "\n{}",
            Self::banner(call)
        );
    }

    fn log(&self, message: &str) {
        info!("{}", message);
    }
}
