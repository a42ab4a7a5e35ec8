//! Port for agent invocation logging.
//!
//! Records which agent ran, which input fields it received and a short
//! preview of the student's request, plus workflow-level milestones such
//! as "consensus reached". This is separate from `tracing` operation logs
//! so the agent transcript can be switched off or sent to a JSONL file.

use tutor_domain::core::string::preview;
use tutor_domain::{AgentInput, AgentOutput};

/// Characters of `user_input` kept in a log preview
pub const USER_PREVIEW_CHARS: usize = 80;

/// One agent invocation, as seen by the logger
#[derive(Debug)]
pub struct AgentCall<'a> {
    pub agent_name: &'a str,
    pub input_keys: Vec<&'static str>,
    /// `user_input` capped at [`USER_PREVIEW_CHARS`], if the input had one
    pub user_preview: Option<String>,
    pub output: &'a AgentOutput,
}

impl<'a> AgentCall<'a> {
    pub fn new(agent_name: &'a str, input: &AgentInput, output: &'a AgentOutput) -> Self {
        Self {
            agent_name,
            input_keys: input.keys(),
            user_preview: input
                .get(tutor_domain::keys::USER_INPUT)
                .map(|text| preview(text, USER_PREVIEW_CHARS)),
            output,
        }
    }

    /// Replace the capped preview with the whole `user_input`
    pub fn with_full_user_input(mut self, input: &AgentInput) -> Self {
        self.user_preview = input.get(tutor_domain::keys::USER_INPUT).map(str::to_string);
        self
    }
}

/// Port for logging agent calls and workflow milestones.
///
/// Both methods are synchronous and non-fallible: a logging failure must
/// never change a workflow's outcome.
pub trait AgentLogger: Send + Sync {
    /// Record one agent invocation.
    fn log_agent(&self, call: &AgentCall<'_>);

    /// Record a workflow-level milestone.
    fn log(&self, message: &str);
}

/// No-op implementation for tests and when agent logging is disabled.
pub struct NoAgentLogger;

impl AgentLogger for NoAgentLogger {
    fn log_agent(&self, _call: &AgentCall<'_>) {}
    fn log(&self, _message: &str) {}
}
