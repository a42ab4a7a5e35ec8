//! Tutoring agents
//!
//! An [`Agent`] is a language model plus a prompt template fixed at
//! construction. Invoking it renders the template with the agent input,
//! makes one model call and returns `{agent_name: reply}`.

mod personas;

pub use personas::{ExpertAgent, TeacherAgent, TutorAgent};

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use tutor_domain::{AgentInput, AgentOutput, AgentRole, PromptTemplate};

/// Errors raised by a single agent invocation
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Model invocation failed for {agent}: {source}")]
    ModelInvocation {
        agent: &'static str,
        #[source]
        source: GatewayError,
    },
}

impl AgentError {
    pub fn agent(&self) -> &'static str {
        match self {
            AgentError::ModelInvocation { agent, .. } => agent,
        }
    }
}

/// A model-backed tutoring role
#[async_trait]
pub trait Agent: Send + Sync {
    fn role(&self) -> AgentRole;

    /// Stable identifier used as the result key stem and log label
    fn name(&self) -> &'static str {
        self.role().name()
    }

    /// Render the prompt with `input`, call the model, return its reply
    async fn invoke(&self, input: &AgentInput) -> Result<AgentOutput, AgentError>;
}

/// Shared machinery behind the personas
struct PromptedAgent {
    role: AgentRole,
    gateway: Arc<dyn LlmGateway>,
    template: PromptTemplate,
}

impl PromptedAgent {
    fn new(role: AgentRole, gateway: Arc<dyn LlmGateway>, template: PromptTemplate) -> Self {
        Self {
            role,
            gateway,
            template,
        }
    }

    async fn invoke(&self, input: &AgentInput) -> Result<AgentOutput, AgentError> {
        let prompt = self.template.render(input);
        debug!(
            "Invoking {} ({} prompt chars)",
            self.role.name(),
            prompt.system.len() + prompt.user.len()
        );

        let reply = self
            .gateway
            .invoke(&prompt)
            .await
            .map_err(|source| AgentError::ModelInvocation {
                agent: self.role.name(),
                source,
            })?;

        Ok(AgentOutput::new(self.role.name(), reply))
    }
}
