//! Builds the orchestration a session's configuration asks for

use super::{
    ConsensusOrchestration, Orchestration, PipelineOrchestration, SingleOrchestration,
};
use crate::ports::agent_logger::{AgentLogger, NoAgentLogger};
use crate::ports::llm_gateway::LlmGateway;
use std::sync::Arc;
use tracing::debug;
use tutor_domain::{
    ConfigurationError, OrchestrationKind, OrchestrationOptions, TutorConfig, TutoringMode,
};

/// Creates orchestrations sharing one gateway, logger and option set
///
/// All validation happens here, before any agent exists.
#[derive(Clone)]
pub struct OrchestrationFactory {
    gateway: Arc<dyn LlmGateway>,
    logger: Arc<dyn AgentLogger>,
    options: OrchestrationOptions,
}

impl OrchestrationFactory {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoAgentLogger),
            options: OrchestrationOptions::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn AgentLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_options(mut self, options: OrchestrationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &OrchestrationOptions {
        &self.options
    }

    pub fn create(&self, config: &TutorConfig) -> Result<Arc<dyn Orchestration>, ConfigurationError> {
        self.options.validate()?;
        let mode_config = config.mode_config()?;
        debug!(
            "Creating {} orchestration ({}, {})",
            config.orchestration,
            mode_config.language(),
            mode_config.mode()
        );

        let gateway = Arc::clone(&self.gateway);
        let logger = Arc::clone(&self.logger);

        let orchestration: Arc<dyn Orchestration> = match config.orchestration {
            OrchestrationKind::Single => {
                Arc::new(SingleOrchestration::new(gateway, &mode_config, logger))
            }
            OrchestrationKind::Pipeline => Arc::new(
                PipelineOrchestration::new(gateway, &mode_config, logger)
                    .with_revision(self.options.revision_enabled),
            ),
            OrchestrationKind::Consensus => Arc::new(
                ConsensusOrchestration::new(gateway, &mode_config, logger)
                    .with_max_rounds(self.options.max_rounds)?,
            ),
        };

        Ok(orchestration)
    }

    /// Build from raw caller strings
    ///
    /// An unknown orchestration type is an error; an unknown mode falls
    /// back to the adaptive template.
    pub fn create_from_strings(
        &self,
        language: &str,
        mode: &str,
        orchestration_type: &str,
    ) -> Result<Arc<dyn Orchestration>, ConfigurationError> {
        let config = TutorConfig::new(
            language,
            orchestration_type.parse()?,
            TutoringMode::parse_lenient(mode),
        );
        self.create(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::orchestration::testing::EchoGateway;

    fn factory() -> OrchestrationFactory {
        OrchestrationFactory::new(Arc::new(EchoGateway))
    }

    #[test]
    fn test_creates_each_kind() {
        let f = factory();
        for (name, kind, agents) in [
            ("single", OrchestrationKind::Single, 1),
            ("multi-agent", OrchestrationKind::Pipeline, 3),
            ("consensus", OrchestrationKind::Consensus, 3),
        ] {
            let o = f.create_from_strings("Python", "adaptive", name).unwrap();
            assert_eq!(o.kind(), kind);
            assert_eq!(o.agent_names().len(), agents);
        }
    }

    #[test]
    fn test_unknown_orchestration_fails_eagerly() {
        let err = factory()
            .create_from_strings("Python", "debug", "swarm")
            .err()
            .unwrap();
        assert_eq!(err, ConfigurationError::UnknownOrchestration("swarm".to_string()));
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        assert!(factory().create_from_strings("Python", "poetry", "single").is_ok());
    }

    #[test]
    fn test_empty_language_rejected() {
        let err = factory()
            .create_from_strings("  ", "debug", "single")
            .err()
            .unwrap();
        assert_eq!(err, ConfigurationError::EmptyLanguage);
    }

    #[test]
    fn test_invalid_options_rejected_for_every_kind() {
        let f = factory().with_options(OrchestrationOptions {
            max_rounds: 0,
            revision_enabled: true,
        });
        let err = f.create(&TutorConfig::default()).err().unwrap();
        assert_eq!(err, ConfigurationError::InvalidMaxRounds);
    }
}
