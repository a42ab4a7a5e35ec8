//! Agent roles participating in a tutoring workflow

use serde::{Deserialize, Serialize};

/// A model-backed tutoring role (Value Object)
///
/// The role name doubles as the workflow state key: each role's latest
/// output is stored under `<name>_result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Talks to the student; its latest answer is what the student sees
    Tutor,
    /// Supplies technically accurate analysis
    Expert,
    /// Reviews the tutor against the expert and the student's request
    Teacher,
}

impl AgentRole {
    /// Stable agent identifier, used as log label and state key prefix
    pub fn name(&self) -> &'static str {
        match self {
            AgentRole::Tutor => "tutor_agent",
            AgentRole::Expert => "expert_agent",
            AgentRole::Teacher => "teacher_agent",
        }
    }

    /// Key under which this role's output lives in the workflow state
    pub fn result_key(&self) -> &'static str {
        match self {
            AgentRole::Tutor => "tutor_agent_result",
            AgentRole::Expert => "expert_agent_result",
            AgentRole::Teacher => "teacher_agent_result",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::Tutor => "Tutor",
            AgentRole::Expert => "Expert",
            AgentRole::Teacher => "Teacher",
        }
    }

    pub fn all() -> [AgentRole; 3] {
        [AgentRole::Tutor, AgentRole::Expert, AgentRole::Teacher]
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tutor" | "tutor_agent" => Ok(AgentRole::Tutor),
            "expert" | "expert_agent" => Ok(AgentRole::Expert),
            "teacher" | "teacher_agent" => Ok(AgentRole::Teacher),
            other => Err(format!("Unknown agent role: {}", other)),
        }
    }
}
