//! Domain error types

use thiserror::Error;

/// Errors raised while building an orchestration, before any agent runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Unknown orchestration type: {0} (expected single, multi-agent, pipeline or consensus)")]
    UnknownOrchestration(String),

    #[error("max_rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("Language cannot be empty")]
    EmptyLanguage,
}

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid student request: {0}")]
    InvalidRequest(String),
}

impl DomainError {
    /// Check if this error was raised while constructing an orchestration
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_orchestration_display() {
        let error = ConfigurationError::UnknownOrchestration("swarm".to_string());
        assert!(error.to_string().contains("swarm"));
    }

    #[test]
    fn test_is_configuration_check() {
        let error: DomainError = ConfigurationError::InvalidMaxRounds.into();
        assert!(error.is_configuration());
        assert!(!DomainError::InvalidRequest("empty".to_string()).is_configuration());
    }
}
