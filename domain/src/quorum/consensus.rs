//! Consensus verdict parsed from a teacher review

use serde::{Deserialize, Serialize};

/// Which recognized marker produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusMarker {
    /// A JSON object with a boolean `consensus` field
    Json,
    /// A `CONSENSUS: YES|NO` line
    ConsensusLine,
    /// A `VERDICT: APPROVE|REVISE` line
    VerdictLine,
}

impl std::fmt::Display for ConsensusMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusMarker::Json => write!(f, "json"),
            ConsensusMarker::ConsensusLine => write!(f, "consensus line"),
            ConsensusMarker::VerdictLine => write!(f, "verdict line"),
        }
    }
}

/// Structured teacher judgment (Value Object)
///
/// `marker` is `None` when the text carried no recognized marker, in which
/// case `feedback` holds the teacher's text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusVerdict {
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<ConsensusMarker>,
}

impl ConsensusVerdict {
    pub fn unmarked(text: impl Into<String>) -> Self {
        Self {
            feedback: text.into(),
            marker: None,
        }
    }

    pub fn marked(feedback: impl Into<String>, marker: ConsensusMarker) -> Self {
        Self {
            feedback: feedback.into(),
            marker: Some(marker),
        }
    }

    /// Whether the teacher's text contained a recognized marker
    pub fn is_structured(&self) -> bool {
        self.marker.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmarked_verdict() {
        let verdict = ConsensusVerdict::unmarked("free text");
        assert!(!verdict.is_structured());
        let value = serde_json::to_value(&verdict).unwrap();
        assert!(value.get("marker").is_none());
        assert_eq!(value["feedback"], "free text");
    }

    #[test]
    fn test_marked_verdict_serializes_marker() {
        let verdict = ConsensusVerdict::marked("ok", ConsensusMarker::ConsensusLine);
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["marker"], "consensus_line");
    }
}
