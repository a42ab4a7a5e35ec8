//! Tutor turn use case
//!
//! One student message in, one tutor reply out. The conversation is saved
//! after the student's message and again after the reply, so a failed
//! workflow still leaves both messages on disk.

use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::ports::progress::{NoProgress, WorkflowProgressNotifier};
use crate::ports::session_store::SessionStore;
use crate::use_cases::orchestration::{Orchestration, OrchestrationFactory};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use tutor_domain::{
    ChatMessage, ConfigurationError, Conversation, ConversationSummary, DomainError, TutorConfig,
    WorkflowRequest, WorkflowState, conversation_id_candidates, extract_final_response,
};

/// Prefix of the reply sent when a workflow fails
pub const APOLOGY_PREFIX: &str =
    "I apologize, but I encountered an error processing your request: ";

/// Errors that stop a turn before a reply can be produced
#[derive(Error, Debug)]
pub enum TutorTurnError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to get orchestrator: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of one turn
#[derive(Debug)]
pub struct TurnOutput {
    /// Text appended to the conversation as the tutor's reply
    pub response: String,
    /// Final workflow state, absent when the workflow failed
    pub state: Option<WorkflowState>,
    /// Workflow error rendered for display, when the reply is an apology
    pub error: Option<String>,
}

impl TurnOutput {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Use case for handling student turns across sessions
pub struct TutorTurnUseCase {
    factory: OrchestrationFactory,
    sessions: Arc<dyn SessionStore>,
    store: Arc<dyn ConversationStore>,
}

impl TutorTurnUseCase {
    pub fn new(
        factory: OrchestrationFactory,
        sessions: Arc<dyn SessionStore>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            factory,
            sessions,
            store,
        }
    }

    /// Start a fresh conversation and build its orchestration
    ///
    /// The id is the first time-based candidate not already held by a live
    /// session or a stored conversation.
    pub async fn start(&self, config: TutorConfig) -> Result<Conversation, TutorTurnError> {
        let orchestration = self.factory.create(&config)?;

        let mut conversation = Conversation::start(config);
        for candidate in conversation_id_candidates(conversation.update_time) {
            if !self.id_taken(&candidate).await {
                conversation.id = candidate;
                break;
            }
        }

        self.sessions.put(&conversation.id, orchestration);
        info!("Started conversation {}", conversation.id);
        Ok(conversation)
    }

    async fn id_taken(&self, id: &str) -> bool {
        if self.sessions.get(id).is_some() {
            return true;
        }
        match self.store.load(id).await {
            Err(StoreError::NotFound(_)) => false,
            Ok(_) => true,
            Err(e) => {
                warn!("Could not check conversation {}: {}", id, e);
                true
            }
        }
    }

    /// Load a stored conversation and rebuild its orchestration
    pub async fn resume(&self, id: &str) -> Result<Conversation, TutorTurnError> {
        let conversation = self.store.load(id).await?;
        match self.factory.create(&conversation.config) {
            Ok(orchestration) => self.sessions.put(&conversation.id, orchestration),
            Err(e) => warn!("Could not recreate orchestrator for {}: {}", id, e),
        }
        Ok(conversation)
    }

    pub async fn list(&self) -> Result<Vec<ConversationSummary>, TutorTurnError> {
        Ok(self.store.list().await?)
    }

    /// Drop the session's orchestration, e.g. when the conversation ends
    pub fn end(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        message: &str,
    ) -> Result<TurnOutput, TutorTurnError> {
        self.execute_with_progress(conversation, message, &NoProgress)
            .await
    }

    pub async fn execute_with_progress(
        &self,
        conversation: &mut Conversation,
        message: &str,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<TurnOutput, TutorTurnError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::InvalidRequest("message is empty".to_string()).into());
        }

        conversation.push(ChatMessage::user(message));
        self.persist(conversation).await;

        let orchestration = self.orchestration_for(conversation)?;

        let request = WorkflowRequest::new(message)
            .with_history(Some(conversation.history_before_last()));

        let output = match orchestration
            .run_workflow_with_progress(request, progress)
            .await
        {
            Ok(state) => TurnOutput {
                response: extract_final_response(&state),
                state: Some(state),
                error: None,
            },
            Err(e) => {
                warn!("Error in workflow: {}", e);
                TurnOutput {
                    response: format!("{}{}", APOLOGY_PREFIX, e),
                    state: None,
                    error: Some(e.to_string()),
                }
            }
        };

        conversation.push(ChatMessage::tutor(output.response.as_str()));
        self.persist(conversation).await;

        Ok(output)
    }

    fn orchestration_for(
        &self,
        conversation: &Conversation,
    ) -> Result<Arc<dyn Orchestration>, TutorTurnError> {
        if let Some(orchestration) = self.sessions.get(&conversation.id) {
            return Ok(orchestration);
        }
        let orchestration = self.factory.create(&conversation.config)?;
        self.sessions
            .put(&conversation.id, Arc::clone(&orchestration));
        Ok(orchestration)
    }

    async fn persist(&self, conversation: &Conversation) {
        if let Err(e) = self.store.save(conversation).await {
            warn!("Error saving conversation {}: {}", conversation.id, e);
        }
    }
}
