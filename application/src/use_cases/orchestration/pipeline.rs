//! Fixed-pipeline orchestration
//!
//! ```text
//! stage = initial:   tutor ──► expert ──► teacher
//!                    expert sees tutor_response
//!                    teacher sees tutor_response + expert_analysis
//! stage = revision:  tutor, with teacher_feedback   (only if revision is enabled)
//! ```
//!
//! The revision call overwrites `tutor_agent_result`; the first answer is
//! not kept.

use super::{AgentInputBuilder, Orchestration, OrchestrationCore, OrchestrationError};
use crate::agents::{Agent, ExpertAgent, TeacherAgent, TutorAgent};
use crate::ports::agent_logger::AgentLogger;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::WorkflowProgressNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use tutor_domain::{
    AgentInput, AgentRole, ModeConfig, OrchestrationKind, PipelineState, Stage, WorkflowRequest,
    WorkflowState, keys,
};

pub struct PipelineOrchestration {
    core: OrchestrationCore,
    revision_enabled: bool,
}

impl PipelineOrchestration {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        config: &ModeConfig,
        logger: Arc<dyn AgentLogger>,
    ) -> Self {
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(TutorAgent::new(gateway.clone(), config)),
            Box::new(ExpertAgent::new(gateway.clone(), config)),
            Box::new(TeacherAgent::new(gateway, config)),
        ];
        Self {
            core: OrchestrationCore::new(agents, logger, config),
            revision_enabled: true,
        }
    }

    pub fn with_revision(mut self, enabled: bool) -> Self {
        self.revision_enabled = enabled;
        self
    }

    pub fn revision_enabled(&self) -> bool {
        self.revision_enabled
    }
}

impl AgentInputBuilder for PipelineOrchestration {
    type State = PipelineState;

    fn agent_input(role: AgentRole, state: &PipelineState) -> AgentInput {
        let mut input = state.request.base_input();

        match role {
            AgentRole::Tutor => {
                if state.stage == Stage::Revision {
                    input.insert(keys::TEACHER_FEEDBACK, state.results.text(AgentRole::Teacher));
                }
            }
            AgentRole::Expert => {
                input.insert(keys::TUTOR_RESPONSE, state.results.text(AgentRole::Tutor));
            }
            AgentRole::Teacher => {
                input.insert(keys::TUTOR_RESPONSE, state.results.text(AgentRole::Tutor));
                input.insert(keys::EXPERT_ANALYSIS, state.results.text(AgentRole::Expert));
            }
        }

        input
    }
}

#[async_trait]
impl Orchestration for PipelineOrchestration {
    fn kind(&self) -> OrchestrationKind {
        OrchestrationKind::Pipeline
    }

    fn agent_names(&self) -> Vec<&'static str> {
        self.core.agent_names()
    }

    async fn run_workflow_with_progress(
        &self,
        request: WorkflowRequest,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowState, OrchestrationError> {
        info!(
            "Starting pipeline workflow (revision {})",
            if self.revision_enabled { "on" } else { "off" }
        );
        let mut state = PipelineState::new(request);

        for role in [AgentRole::Tutor, AgentRole::Expert, AgentRole::Teacher] {
            self.core.run_agent::<Self>(role, &mut state, progress).await?;
        }

        if self.revision_enabled {
            state.stage = Stage::Revision;
            self.core.logger().log("Revision requested from tutor.");
            self.core
                .run_agent::<Self>(AgentRole::Tutor, &mut state, progress)
                .await?;
        }

        Ok(state.into())
    }
}
