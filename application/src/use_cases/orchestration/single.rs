//! Single-agent orchestration: one tutor call

use super::{AgentInputBuilder, Orchestration, OrchestrationCore, OrchestrationError};
use crate::agents::{Agent, TutorAgent};
use crate::ports::agent_logger::AgentLogger;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::WorkflowProgressNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use tutor_domain::{
    AgentInput, AgentRole, ModeConfig, OrchestrationKind, SingleState, WorkflowRequest,
    WorkflowState, keys,
};

pub struct SingleOrchestration {
    core: OrchestrationCore,
}

impl SingleOrchestration {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        config: &ModeConfig,
        logger: Arc<dyn AgentLogger>,
    ) -> Self {
        let agents: Vec<Box<dyn Agent>> = vec![Box::new(TutorAgent::new(gateway, config))];
        Self {
            core: OrchestrationCore::new(agents, logger, config),
        }
    }
}

impl AgentInputBuilder for SingleOrchestration {
    type State = SingleState;

    /// The tutor always receives `conversation_history`, empty on a first turn
    fn agent_input(_role: AgentRole, state: &SingleState) -> AgentInput {
        let request = &state.request;
        let mut input = AgentInput::new(request.user_input.as_str()).with(
            keys::CONVERSATION_HISTORY,
            request.conversation_history.clone().unwrap_or_default(),
        );
        if let Some(context) = &request.context {
            input.insert(keys::CONTEXT, context.as_str());
        }
        input
    }
}

#[async_trait]
impl Orchestration for SingleOrchestration {
    fn kind(&self) -> OrchestrationKind {
        OrchestrationKind::Single
    }

    fn agent_names(&self) -> Vec<&'static str> {
        self.core.agent_names()
    }

    async fn run_workflow_with_progress(
        &self,
        request: WorkflowRequest,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowState, OrchestrationError> {
        info!("Starting single-agent workflow");
        let mut state = SingleState::new(request);

        self.core
            .run_agent::<Self>(AgentRole::Tutor, &mut state, progress)
            .await?;

        Ok(state.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::agent_logger::NoAgentLogger;
    use crate::use_cases::orchestration::testing::{EchoGateway, RecordingLogger, ScriptedGateway};

    fn orchestration(gateway: Arc<dyn LlmGateway>) -> SingleOrchestration {
        SingleOrchestration::new(gateway, &ModeConfig::default(), Arc::new(NoAgentLogger))
    }

    #[tokio::test]
    async fn test_only_tutor_result() {
        let gateway = ScriptedGateway::new(["answer"]);
        let state = orchestration(gateway.clone())
            .run_workflow(WorkflowRequest::new("q"))
            .await
            .unwrap();

        assert_eq!(state.result_keys(), vec!["tutor_agent_result"]);
        assert_eq!(state.kind(), OrchestrationKind::Single);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_echo_contains_request() {
        let state = orchestration(Arc::new(EchoGateway))
            .run_workflow(WorkflowRequest::new("what is a dict?"))
            .await
            .unwrap();

        let text = state.tutor_result().unwrap().text();
        assert!(text.contains("what is a dict?"));
    }

    #[test]
    fn test_agent_input_always_has_history() {
        let state = SingleState::new(WorkflowRequest::new("q"));
        let input = SingleOrchestration::agent_input(AgentRole::Tutor, &state);
        assert_eq!(input.keys(), vec![keys::USER_INPUT, keys::CONVERSATION_HISTORY]);
        assert_eq!(input.get(keys::CONVERSATION_HISTORY), Some(""));
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let gateway = ScriptedGateway::from_replies(vec![Err("backend down".to_string())]);
        let err = orchestration(gateway)
            .run_workflow(WorkflowRequest::new("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, OrchestrationError::Agent(_)));
        assert!(err.to_string().contains("tutor_agent"));
    }

    #[tokio::test]
    async fn test_debug_mode_logs_full_request() {
        let request = "z".repeat(120);
        let preview = format!("{}...", "z".repeat(80));
        for (debug_mode, expected) in [(false, preview), (true, request.clone())] {
            let logger = Arc::new(RecordingLogger::default());
            let config = ModeConfig::default().with_debug_mode(debug_mode);
            SingleOrchestration::new(Arc::new(EchoGateway), &config, logger.clone())
                .run_workflow(WorkflowRequest::new(request.as_str()))
                .await
                .unwrap();

            let calls = logger.calls.lock().unwrap();
            assert_eq!(calls[0].2.as_deref(), Some(expected.as_str()));
        }
    }

    #[test]
    fn test_agent_names() {
        let o = orchestration(Arc::new(EchoGateway));
        assert_eq!(o.agent_names(), vec!["tutor_agent"]);
    }
}
