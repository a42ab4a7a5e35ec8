//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Pass of the fixed tutor → expert → teacher pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// First pass: tutor, expert and teacher each run once
    #[default]
    Initial,
    /// Second pass: the tutor answers again with the teacher's review attached
    Revision,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Initial => "initial",
            Stage::Revision => "revision",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one expert → tutor → teacher round of the consensus variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (1-indexed)
    pub round_num: usize,
    /// Whether the teacher signalled consensus this round
    pub consensus: bool,
    /// Residual teacher feedback
    pub feedback: String,
}

impl RoundRecord {
    pub fn new(round_num: usize, consensus: bool, feedback: impl Into<String>) -> Self {
        Self {
            round_num,
            consensus,
            feedback: feedback.into(),
        }
    }
}
