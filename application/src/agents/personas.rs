//! The three tutoring personas
//!
//! Each persona is its own type built from the shared mode configuration;
//! its prompt template is chosen once in `new` and never changes.

use super::{Agent, AgentError, PromptedAgent};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use std::sync::Arc;
use tutor_domain::{AgentInput, AgentOutput, AgentPromptTemplate, AgentRole, ModeConfig, PromptTemplate};

macro_rules! persona {
    ($(#[$doc:meta])* $name:ident, $role:expr, $template:path) => {
        $(#[$doc])*
        pub struct $name {
            inner: PromptedAgent,
        }

        impl $name {
            pub fn new(gateway: Arc<dyn LlmGateway>, config: &ModeConfig) -> Self {
                Self {
                    inner: PromptedAgent::new($role, gateway, $template(config)),
                }
            }

            pub fn template(&self) -> &PromptTemplate {
                &self.inner.template
            }
        }

        #[async_trait]
        impl Agent for $name {
            fn role(&self) -> AgentRole {
                $role
            }

            async fn invoke(&self, input: &AgentInput) -> Result<AgentOutput, AgentError> {
                self.inner.invoke(input).await
            }
        }
    };
}

persona!(
    /// Student-facing tutor; its prompt depends on the tutoring mode
    TutorAgent,
    AgentRole::Tutor,
    AgentPromptTemplate::tutor
);

persona!(
    /// Technical reviewer
    ExpertAgent,
    AgentRole::Expert,
    AgentPromptTemplate::expert
);

persona!(
    /// Pedagogical reviewer whose reply carries the consensus marker
    TeacherAgent,
    AgentRole::Teacher,
    AgentPromptTemplate::teacher
);
