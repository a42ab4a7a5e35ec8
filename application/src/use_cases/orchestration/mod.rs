//! Tutoring orchestrations
//!
//! An orchestration owns a fixed set of agents and runs one workflow per
//! student request. The three variants differ only in which agents run,
//! in what order, and when to stop:
//!
//! ```text
//! Single:     tutor
//! Pipeline:   tutor → expert → teacher [→ tutor (revision)]
//! Consensus:  (expert → tutor → teacher) × rounds, until the teacher agrees
//! ```
//!
//! Every agent call goes through [`OrchestrationCore::run_agent`]: build the
//! input from the current state, invoke, log, record the output. Agents run
//! strictly one after another; the first failed call aborts the workflow.

mod consensus;
mod factory;
mod pipeline;
mod single;

#[cfg(test)]
pub(crate) mod testing;

pub use consensus::ConsensusOrchestration;
pub use factory::OrchestrationFactory;
pub use pipeline::PipelineOrchestration;
pub use single::SingleOrchestration;

use crate::agents::{Agent, AgentError};
use crate::ports::agent_logger::{AgentCall, AgentLogger};
use crate::ports::progress::{NoProgress, WorkflowProgressNotifier};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use tutor_domain::{
    AgentInput, AgentRole, ConfigurationError, HasResults, ModeConfig, OrchestrationKind,
    WorkflowRequest, WorkflowState,
};

/// Errors that abort a workflow or prevent one from being built
#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Agent {0} is not part of this orchestration")]
    AgentNotFound(&'static str),
}

/// A selectable tutoring workflow
#[async_trait]
pub trait Orchestration: Send + Sync {
    fn kind(&self) -> OrchestrationKind;

    /// Names of the agents built for this orchestration
    fn agent_names(&self) -> Vec<&'static str>;

    /// Run one workflow with progress callbacks
    async fn run_workflow_with_progress(
        &self,
        request: WorkflowRequest,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowState, OrchestrationError>;

    /// Run one workflow for a student request
    async fn run_workflow(&self, request: WorkflowRequest) -> Result<WorkflowState, OrchestrationError> {
        self.run_workflow_with_progress(request, &NoProgress).await
    }
}

/// How a variant derives each agent's input from its state
///
/// Implementations must be pure: the same state always yields the same
/// input and the state is never modified.
pub trait AgentInputBuilder {
    type State: HasResults + Send;

    fn agent_input(role: AgentRole, state: &Self::State) -> AgentInput;
}

/// Agent set, logger and the shared `run_agent` primitive
pub(crate) struct OrchestrationCore {
    agents: Vec<Box<dyn Agent>>,
    logger: Arc<dyn AgentLogger>,
    debug_mode: bool,
}

impl OrchestrationCore {
    pub(crate) fn new(
        agents: Vec<Box<dyn Agent>>,
        logger: Arc<dyn AgentLogger>,
        config: &ModeConfig,
    ) -> Self {
        Self {
            agents,
            logger,
            debug_mode: config.debug_mode(),
        }
    }

    pub(crate) fn agent_names(&self) -> Vec<&'static str> {
        self.agents.iter().map(|agent| agent.name()).collect()
    }

    pub(crate) fn logger(&self) -> &dyn AgentLogger {
        self.logger.as_ref()
    }

    fn agent(&self, role: AgentRole) -> Result<&dyn Agent, OrchestrationError> {
        self.agents
            .iter()
            .find(|agent| agent.role() == role)
            .map(|agent| agent.as_ref())
            .ok_or(OrchestrationError::AgentNotFound(role.name()))
    }

    /// Build `role`'s input from `state`, invoke it, log the call and store
    /// its output under `<agent>_result`
    pub(crate) async fn run_agent<B: AgentInputBuilder>(
        &self,
        role: AgentRole,
        state: &mut B::State,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<(), OrchestrationError> {
        let agent = self.agent(role)?;
        let input = B::agent_input(role, state);
        debug!("Running {} with inputs: {}", agent.name(), input.keys().join(", "));

        progress.on_agent_start(role);
        let output = match agent.invoke(&input).await {
            Ok(output) => output,
            Err(e) => {
                progress.on_agent_complete(role, false);
                return Err(e.into());
            }
        };
        progress.on_agent_complete(role, true);

        let call = AgentCall::new(agent.name(), &input, &output);
        let call = if self.debug_mode {
            call.with_full_user_input(&input)
        } else {
            call
        };
        self.logger.log_agent(&call);
        state.results_mut().record(role, output);
        Ok(())
    }
}
