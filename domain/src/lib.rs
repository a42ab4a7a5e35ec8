//! Domain layer for agent-tutor
//!
//! This crate contains the tutoring logic that does not touch I/O: agent
//! roles and mode configuration, prompt templates, agent output unwrapping,
//! the typed per-variant workflow state and the teacher consensus parser.
//!
//! # Core Concepts
//!
//! ## Agents
//!
//! Three model-backed roles share one [`ModeConfig`]:
//!
//! - **Tutor**: answers the student; its latest output is always the response
//! - **Expert**: technical analysis of the request and the tutor's answer
//! - **Teacher**: pedagogical review ending in a consensus marker
//!
//! ## Orchestrations
//!
//! - **Single**: one tutor call
//! - **Pipeline**: tutor → expert → teacher, then an optional tutor revision
//! - **Consensus**: expert → tutor → teacher rounds until the teacher agrees

pub mod agent;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod quorum;
pub mod session;

// Re-export commonly used types
pub use agent::{
    mode_config::{DEFAULT_LANGUAGE, ModeConfig, SUPPORTED_LANGUAGES, TutoringMode},
    output::{AgentOutput, MalformedAgentOutput, ModelReply},
    role::AgentRole,
};
pub use self::core::error::{ConfigurationError, DomainError};
pub use orchestration::{
    config::{DEFAULT_MAX_ROUNDS, OrchestrationKind, OrchestrationOptions, TutorConfig},
    entities::{RoundRecord, Stage},
    input::{AgentInput, keys},
    state::{
        AgentResults, ConsensusState, HasResults, PipelineState, SingleState, WorkflowRequest,
        WorkflowState,
    },
};
pub use prompt::{AgentPromptTemplate, PromptTemplate, RenderedPrompt};
pub use session::{
    entities::{
        ChatMessage, Conversation, ConversationSummary, MessageRole, conversation_id_candidates,
        format_history,
    },
    response::{extract_code_blocks, extract_final_response},
};

// Re-export quorum types
pub use quorum::{ConsensusMarker, ConsensusVerdict, parse_consensus};
