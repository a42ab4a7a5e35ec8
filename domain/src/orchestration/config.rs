//! Caller-supplied orchestration configuration

use crate::agent::mode_config::{DEFAULT_LANGUAGE, ModeConfig, TutoringMode};
use crate::core::error::ConfigurationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default number of rounds the consensus variant may run
pub const DEFAULT_MAX_ROUNDS: usize = 3;

/// Which orchestration strategy drives a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrchestrationKind {
    /// One tutor pass
    #[default]
    Single,
    /// Tutor → expert → teacher, optionally followed by a tutor revision
    Pipeline,
    /// Expert → tutor → teacher rounds until the teacher signals consensus
    Consensus,
}

impl OrchestrationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrchestrationKind::Single => "single",
            OrchestrationKind::Pipeline => "pipeline",
            OrchestrationKind::Consensus => "consensus",
        }
    }

    pub fn is_multi_agent(&self) -> bool {
        !matches!(self, OrchestrationKind::Single)
    }
}

impl std::fmt::Display for OrchestrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrchestrationKind {
    type Err = ConfigurationError;

    /// `multi-agent` selects the pipeline, the multi-agent default
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "solo" => Ok(OrchestrationKind::Single),
            "multi-agent" | "multi" | "pipeline" => Ok(OrchestrationKind::Pipeline),
            "consensus" | "rounds" => Ok(OrchestrationKind::Consensus),
            other => Err(ConfigurationError::UnknownOrchestration(other.to_string())),
        }
    }
}

impl Serialize for OrchestrationKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrchestrationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Session configuration chosen by the student
///
/// Persisted alongside each conversation so a session can be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    pub language: String,
    #[serde(rename = "orchestration_type")]
    pub orchestration: OrchestrationKind,
    pub mode: TutoringMode,
    /// Log agent calls with the student's full request instead of a preview
    pub debug_mode: bool,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            orchestration: OrchestrationKind::default(),
            mode: TutoringMode::default(),
            debug_mode: false,
        }
    }
}

impl TutorConfig {
    pub fn new(
        language: impl Into<String>,
        orchestration: OrchestrationKind,
        mode: TutoringMode,
    ) -> Self {
        Self {
            language: language.into(),
            orchestration,
            mode,
            debug_mode: false,
        }
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Build the agents' shared mode configuration
    pub fn mode_config(&self) -> Result<ModeConfig, ConfigurationError> {
        Ok(ModeConfig::new(self.language.clone(), self.mode)?.with_debug_mode(self.debug_mode))
    }
}

/// Scalar knobs of the multi-agent variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrationOptions {
    /// Round cap for the consensus variant
    pub max_rounds: usize,
    /// Whether the pipeline runs the tutor revision pass
    pub revision_enabled: bool,
}

impl Default for OrchestrationOptions {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            revision_enabled: true,
        }
    }
}

impl OrchestrationOptions {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_rounds == 0 {
            return Err(ConfigurationError::InvalidMaxRounds);
        }
        Ok(())
    }
}
