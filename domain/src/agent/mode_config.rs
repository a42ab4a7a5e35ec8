//! Tutoring mode configuration shared by every agent of an orchestration

use crate::core::error::ConfigurationError;
use serde::{Deserialize, Deserializer, Serialize};

/// Default programming language taught when none is configured
pub const DEFAULT_LANGUAGE: &str = "Python";

/// Languages offered by the CLI. Any non-empty language is accepted.
pub const SUPPORTED_LANGUAGES: &[&str] = &["Python", "Java", "C++", "Go", "C"];

/// Style of tutoring selected by the student
///
/// Unrecognized mode strings fall back to [`TutoringMode::Adaptive`]
/// rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TutoringMode {
    /// Adjusts to whatever the student needs
    #[default]
    Adaptive,
    /// Find and fix problems in the student's code
    Debug,
    /// Explain core language concepts
    Fundamentals,
    /// Show worked code examples
    Examples,
    /// Hand out practice exercises
    Exercise,
    /// Review code the student wrote
    Feedback,
}

impl TutoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TutoringMode::Adaptive => "adaptive",
            TutoringMode::Debug => "debug",
            TutoringMode::Fundamentals => "fundamentals",
            TutoringMode::Examples => "examples",
            TutoringMode::Exercise => "exercise",
            TutoringMode::Feedback => "feedback",
        }
    }

    /// Menu description shown to the student
    pub fn description(&self) -> &'static str {
        match self {
            TutoringMode::Adaptive => "Adaptive (Adjusts to user's needs)",
            TutoringMode::Debug => "Debug (Fix code issues)",
            TutoringMode::Fundamentals => "Fundamentals (Learn the basics)",
            TutoringMode::Examples => "Examples (See sample implementations)",
            TutoringMode::Exercise => "Exercises (Practice your skills)",
            TutoringMode::Feedback => "Feedback (Review your code)",
        }
    }

    pub fn all() -> [TutoringMode; 6] {
        [
            TutoringMode::Adaptive,
            TutoringMode::Debug,
            TutoringMode::Fundamentals,
            TutoringMode::Examples,
            TutoringMode::Exercise,
            TutoringMode::Feedback,
        ]
    }

    /// Parse a mode string, falling back to `Adaptive` for anything unknown
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "debug" => TutoringMode::Debug,
            "fundamentals" => TutoringMode::Fundamentals,
            "examples" => TutoringMode::Examples,
            "exercise" | "exercises" => TutoringMode::Exercise,
            "feedback" => TutoringMode::Feedback,
            _ => TutoringMode::Adaptive,
        }
    }
}

impl std::fmt::Display for TutoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TutoringMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl<'de> Deserialize<'de> for TutoringMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&s))
    }
}

/// Immutable per-orchestration agent configuration (Value Object)
///
/// Created once when an orchestration is built and shared read-only by
/// all of its agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfig {
    language: String,
    mode: TutoringMode,
    debug_mode: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            mode: TutoringMode::default(),
            debug_mode: false,
        }
    }
}

impl ModeConfig {
    /// Create a mode configuration, rejecting an empty language
    pub fn new(language: impl Into<String>, mode: TutoringMode) -> Result<Self, ConfigurationError> {
        let language = language.into();
        if language.trim().is_empty() {
            return Err(ConfigurationError::EmptyLanguage);
        }
        Ok(Self {
            language: language.trim().to_string(),
            mode,
            debug_mode: false,
        })
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn mode(&self) -> TutoringMode {
        self.mode
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }
}
