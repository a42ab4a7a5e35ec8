//! Progress notification port
//!
//! Defines the interface for reporting progress while a tutoring workflow runs.

use tutor_domain::AgentRole;

/// Callback for progress updates during a workflow
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait WorkflowProgressNotifier: Send + Sync {
    /// Called before an agent's model call
    fn on_agent_start(&self, role: AgentRole);

    /// Called after an agent's model call returns or fails
    fn on_agent_complete(&self, role: AgentRole, success: bool);

    /// Called at the end of each consensus round
    fn on_round_complete(&self, _round: usize, _consensus: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl WorkflowProgressNotifier for NoProgress {
    fn on_agent_start(&self, _role: AgentRole) {}
    fn on_agent_complete(&self, _role: AgentRole, _success: bool) {}
}
