//! Configuration file loading for agent-tutor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TUTOR_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./tutor.toml` or `./.tutor.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agent-tutor/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    AgentLogSink, ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECONDS, FileConfig, FileConversationsConfig, FileLoggingConfig,
    FileModelConfig, FileOrchestrationConfig, FileOutputConfig, FileTutorConfig,
};
pub use loader::ConfigLoader;
