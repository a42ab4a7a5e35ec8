//! Application layer for agent-tutor
//!
//! This crate contains the tutoring agents, the orchestration workflows,
//! the tutor-turn use case and the port definitions they depend on.
//! It depends only on the domain layer.

pub mod agents;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{Agent, AgentError, ExpertAgent, TeacherAgent, TutorAgent};
pub use ports::{
    agent_logger::{AgentCall, AgentLogger, NoAgentLogger, USER_PREVIEW_CHARS},
    conversation_store::{ConversationStore, StoreError},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, WorkflowProgressNotifier},
    session_store::SessionStore,
};
pub use use_cases::orchestration::{
    AgentInputBuilder, ConsensusOrchestration, Orchestration, OrchestrationError,
    OrchestrationFactory, PipelineOrchestration, SingleOrchestration,
};
pub use use_cases::tutor_turn::{APOLOGY_PREFIX, TurnOutput, TutorTurnError, TutorTurnUseCase};
