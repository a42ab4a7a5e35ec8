//! Round-based consensus orchestration
//!
//! Each round runs expert → tutor → teacher, then parses the teacher's
//! review for a consensus marker. Rounds repeat until the teacher agrees or
//! `max_rounds` is reached. Running out of rounds is a normal outcome: the
//! state comes back with `consensus == false` and the latest answers.

use super::{AgentInputBuilder, Orchestration, OrchestrationCore, OrchestrationError};
use crate::agents::{Agent, ExpertAgent, TeacherAgent, TutorAgent};
use crate::ports::agent_logger::AgentLogger;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::WorkflowProgressNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use tutor_domain::{
    AgentInput, AgentRole, ConfigurationError, ConsensusState, DEFAULT_MAX_ROUNDS, ModeConfig,
    OrchestrationKind, RoundRecord, WorkflowRequest, WorkflowState, keys, parse_consensus,
};

pub struct ConsensusOrchestration {
    core: OrchestrationCore,
    max_rounds: usize,
}

impl ConsensusOrchestration {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        config: &ModeConfig,
        logger: Arc<dyn AgentLogger>,
    ) -> Self {
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(ExpertAgent::new(gateway.clone(), config)),
            Box::new(TutorAgent::new(gateway.clone(), config)),
            Box::new(TeacherAgent::new(gateway, config)),
        ];
        Self {
            core: OrchestrationCore::new(agents, logger, config),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Set the round cap; at least one round is required
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Result<Self, ConfigurationError> {
        if max_rounds == 0 {
            return Err(ConfigurationError::InvalidMaxRounds);
        }
        self.max_rounds = max_rounds;
        Ok(self)
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Parse the teacher's latest review into the state and close the round
    fn close_round(&self, state: &mut ConsensusState) {
        let review = state.results.text(AgentRole::Teacher);
        let (consensus, verdict) = parse_consensus(&review);

        state.consensus = consensus;
        state
            .history
            .push(RoundRecord::new(state.round_num, consensus, verdict.feedback.clone()));

        if consensus {
            self.core
                .logger()
                .log(&format!("Consensus reached at round #{}", state.round_num));
        } else {
            self.core.logger().log("Revision requested by teacher.");
            state.revision_feedback = Some(verdict.feedback.clone());
        }

        state.teacher_parsed_response = Some(verdict);
    }
}

impl AgentInputBuilder for ConsensusOrchestration {
    type State = ConsensusState;

    fn agent_input(role: AgentRole, state: &ConsensusState) -> AgentInput {
        let mut input = state.request.base_input();

        match role {
            // Base input only, in every round
            AgentRole::Expert => {}
            AgentRole::Tutor => {
                input.insert(keys::EXPERT_RESPONSE, state.results.text(AgentRole::Expert));
                // Gated on `teacher_feedback`, which the round loop never sets
                if state.teacher_feedback.is_some()
                    && let Some(feedback) = &state.revision_feedback
                {
                    input.insert(keys::REVISION_FEEDBACK, feedback.as_str());
                }
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
impl Orchestration for ConsensusOrchestration {
    fn kind(&self) -> OrchestrationKind {
        OrchestrationKind::Consensus
    }

    fn agent_names(&self) -> Vec<&'static str> {
        self.core.agent_names()
    }

    async fn run_workflow_with_progress(
        &self,
        request: WorkflowRequest,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowState, OrchestrationError> {
        info!("Starting consensus workflow (max {} rounds)", self.max_rounds);
        let mut state = ConsensusState::new(request);

        while !state.consensus && state.round_num < self.max_rounds {
            state.round_num += 1;
            info!("Round {}/{}", state.round_num, self.max_rounds);

            for role in [AgentRole::Expert, AgentRole::Tutor, AgentRole::Teacher] {
                self.core.run_agent::<Self>(role, &mut state, progress).await?;
            }

            self.close_round(&mut state);
            progress.on_round_complete(state.round_num, state.consensus);
        }

        if !state.consensus {
            self.core
                .logger()
                .log("Max rounds reached without consensus. Returning progress.");
        }

        Ok(state.into())
    }
}
