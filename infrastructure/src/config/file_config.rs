//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tutor_domain::{
    DEFAULT_LANGUAGE, DEFAULT_MAX_ROUNDS, OrchestrationKind, OrchestrationOptions, TutorConfig,
    TutoringMode,
};

/// Default Ollama model
pub const DEFAULT_MODEL: &str = "llama3.2:3b";
/// Default Ollama endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("orchestration.max_rounds cannot be 0")]
    InvalidMaxRounds,

    #[error("model.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("tutor.language cannot be empty")]
    EmptyLanguage,

    #[error("logging.jsonl_path is required when agent_log = \"jsonl\"")]
    MissingJsonlPath,
}

/// Raw `[tutor]` section: the session defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTutorConfig {
    pub language: String,
    pub mode: TutoringMode,
    pub orchestration: OrchestrationKind,
    /// Log agent calls with the student's full request
    pub debug_mode: bool,
}

impl Default for FileTutorConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            mode: TutoringMode::default(),
            orchestration: OrchestrationKind::default(),
            debug_mode: false,
        }
    }
}

/// Raw `[orchestration]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    /// Round cap for the consensus variant
    pub max_rounds: usize,
    /// Whether the pipeline runs the tutor revision pass
    pub revision_enabled: bool,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            revision_enabled: true,
        }
    }
}

/// Raw `[model]` section for the Ollama backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub name: String,
    pub base_url: String,
    pub temperature: f32,
    /// Timeout in seconds for one model call
    pub timeout_seconds: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Where agent invocations are logged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentLogSink {
    /// No agent logging
    Off,
    /// Banner lines through `tracing`
    #[default]
    Tracing,
    /// One JSON object per event in `jsonl_path`
    Jsonl,
}

/// Raw `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub agent_log: AgentLogSink,
    pub jsonl_path: Option<PathBuf>,
}

/// Raw `[conversations]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationsConfig {
    /// Directory holding `<id>.json` files
    pub directory: PathBuf,
}

impl Default for FileConversationsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("conversations"),
        }
    }
}

/// Raw `[output]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_progress: true,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub tutor: FileTutorConfig,
    pub orchestration: FileOrchestrationConfig,
    pub model: FileModelConfig,
    pub logging: FileLoggingConfig,
    pub conversations: FileConversationsConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.orchestration.max_rounds == 0 {
            return Err(ConfigValidationError::InvalidMaxRounds);
        }

        if self.model.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.model.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.tutor.language.trim().is_empty() {
            return Err(ConfigValidationError::EmptyLanguage);
        }

        if self.logging.agent_log == AgentLogSink::Jsonl && self.logging.jsonl_path.is_none() {
            return Err(ConfigValidationError::MissingJsonlPath);
        }

        Ok(())
    }

    /// Session defaults for new conversations
    pub fn tutor_config(&self) -> TutorConfig {
        TutorConfig::new(
            self.tutor.language.clone(),
            self.tutor.orchestration,
            self.tutor.mode,
        )
        .with_debug_mode(self.tutor.debug_mode)
    }

    pub fn orchestration_options(&self) -> OrchestrationOptions {
        OrchestrationOptions {
            max_rounds: self.orchestration.max_rounds,
            revision_enabled: self.orchestration.revision_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[tutor]
language = "Go"
mode = "debug"
orchestration = "consensus"
debug_mode = true

[orchestration]
max_rounds = 5
revision_enabled = false

[model]
name = "qwen2.5-coder:7b"
base_url = "http://gpu-box:11434"
temperature = 0.2
timeout_seconds = 300

[logging]
agent_log = "jsonl"
jsonl_path = "logs/agents.jsonl"

[conversations]
directory = "/tmp/tutor"

[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tutor.language, "Go");
        assert_eq!(config.tutor.mode, TutoringMode::Debug);
        assert_eq!(config.tutor.orchestration, OrchestrationKind::Consensus);
        assert!(config.tutor.debug_mode);
        assert!(config.tutor_config().debug_mode);
        assert_eq!(config.orchestration.max_rounds, 5);
        assert!(!config.orchestration.revision_enabled);
        assert_eq!(config.model.name, "qwen2.5-coder:7b");
        assert_eq!(config.model.timeout_seconds, 300);
        assert_eq!(config.logging.agent_log, AgentLogSink::Jsonl);
        assert_eq!(
            config.logging.jsonl_path,
            Some(PathBuf::from("logs/agents.jsonl"))
        );
        assert_eq!(config.conversations.directory, PathBuf::from("/tmp/tutor"));
        assert!(!config.output.color);
        assert!(config.output.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config_uses_defaults() {
        let config: FileConfig = toml::from_str("[tutor]\nlanguage = \"C\"\n").unwrap();

        assert_eq!(config.tutor.language, "C");
        assert_eq!(config.tutor.orchestration, OrchestrationKind::Single);
        assert!(!config.tutor.debug_mode);
        assert_eq!(config.model.name, DEFAULT_MODEL);
        assert_eq!(config.model.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.orchestration.max_rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(config.logging.agent_log, AgentLogSink::Tracing);
    }

    #[test]
    fn test_multi_agent_alias_selects_pipeline() {
        let config: FileConfig =
            toml::from_str("[tutor]\norchestration = \"multi-agent\"\n").unwrap();
        assert_eq!(config.tutor.orchestration, OrchestrationKind::Pipeline);
    }

    #[test]
    fn test_unknown_orchestration_fails_to_parse() {
        let result: Result<FileConfig, _> = toml::from_str("[tutor]\norchestration = \"swarm\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        assert!(config.validate().is_ok());

        config.orchestration.max_rounds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMaxRounds));

        let mut config = FileConfig::default();
        config.model.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.model.name = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.tutor.language = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyLanguage));

        let mut config = FileConfig::default();
        config.logging.agent_log = AgentLogSink::Jsonl;
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingJsonlPath));
    }

    #[test]
    fn test_conversion_to_domain_types() {
        let mut config = FileConfig::default();
        config.tutor.language = "Java".to_string();
        config.tutor.mode = TutoringMode::Exercise;
        config.orchestration.revision_enabled = false;

        let tutor = config.tutor_config();
        assert_eq!(tutor.language, "Java");
        assert_eq!(tutor.mode, TutoringMode::Exercise);

        let options = config.orchestration_options();
        assert_eq!(options.max_rounds, DEFAULT_MAX_ROUNDS);
        assert!(!options.revision_enabled);
    }
}
