//! Typed workflow state, one structure per orchestration kind
//!
//! A state is created fresh for each workflow run and discarded when the
//! caller is done with it. Agent outputs accumulate in [`AgentResults`] in
//! invocation order; a role that runs again overwrites its earlier output
//! in place.

use super::config::OrchestrationKind;
use super::entities::{RoundRecord, Stage};
use super::input::{AgentInput, keys};
use crate::agent::output::AgentOutput;
use crate::agent::role::AgentRole;
use crate::quorum::consensus::ConsensusVerdict;
use serde_json::{Map, Value, json};

/// What the caller asks a workflow to answer (Value Object)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowRequest {
    /// The student's current message
    pub user_input: String,
    /// Formatted prior turns
    pub conversation_history: Option<String>,
    /// Extra material supplied alongside the request (e.g. a source file)
    pub context: Option<String>,
}

impl WorkflowRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            ..Default::default()
        }
    }

    /// Attach history; empty history is treated as absent
    pub fn with_history(mut self, history: Option<impl Into<String>>) -> Self {
        self.conversation_history = history.map(Into::into).filter(|h| !h.is_empty());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Fields every agent receives: the request plus history and context
    /// when present
    pub fn base_input(&self) -> AgentInput {
        let mut input = AgentInput::new(self.user_input.as_str());
        if let Some(history) = &self.conversation_history {
            input.insert(keys::CONVERSATION_HISTORY, history.as_str());
        }
        if let Some(context) = &self.context {
            input.insert(keys::CONTEXT, context.as_str());
        }
        input
    }
}

/// Agent outputs in invocation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentResults {
    entries: Vec<(AgentRole, AgentOutput)>,
}

impl AgentResults {
    /// Store a role's output, replacing any earlier output from that role
    pub fn record(&mut self, role: AgentRole, output: AgentOutput) {
        match self.entries.iter_mut().find(|(r, _)| *r == role) {
            Some(entry) => entry.1 = output,
            None => self.entries.push((role, output)),
        }
    }

    pub fn get(&self, role: AgentRole) -> Option<&AgentOutput> {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, output)| output)
    }

    /// Extracted text of a role's output, empty when the role has not run
    pub fn text(&self, role: AgentRole) -> String {
        self.get(role).map(AgentOutput::text).unwrap_or_default()
    }

    pub fn contains(&self, role: AgentRole) -> bool {
        self.get(role).is_some()
    }

    /// `<agent>_result` keys in invocation order
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(role, _)| role.result_key()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentRole, &AgentOutput)> {
        self.entries.iter().map(|(role, output)| (*role, output))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Anything that accumulates agent results during a run
pub trait HasResults {
    fn results(&self) -> &AgentResults;
    fn results_mut(&mut self) -> &mut AgentResults;
}

/// State of the single-agent workflow
#[derive(Debug, Clone, PartialEq)]
pub struct SingleState {
    pub request: WorkflowRequest,
    pub results: AgentResults,
}

impl SingleState {
    pub fn new(request: WorkflowRequest) -> Self {
        Self {
            request,
            results: AgentResults::default(),
        }
    }
}

/// State of the fixed tutor → expert → teacher pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    pub request: WorkflowRequest,
    pub stage: Stage,
    pub results: AgentResults,
}

impl PipelineState {
    pub fn new(request: WorkflowRequest) -> Self {
        Self {
            request,
            stage: Stage::Initial,
            results: AgentResults::default(),
        }
    }
}

/// State of the round-based consensus workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusState {
    pub request: WorkflowRequest,
    /// Current round; 0 before the first round starts
    pub round_num: usize,
    pub consensus: bool,
    /// One record per completed round
    pub history: Vec<RoundRecord>,
    /// Latest parsed teacher review
    pub teacher_parsed_response: Option<ConsensusVerdict>,
    /// Latest teacher feedback when consensus was not reached
    pub revision_feedback: Option<String>,
    /// Gate for handing `revision_feedback` to the tutor. The round loop
    /// never sets it, so the tutor does not see revision feedback.
    pub teacher_feedback: Option<String>,
    pub results: AgentResults,
}

impl ConsensusState {
    pub fn new(request: WorkflowRequest) -> Self {
        Self {
            request,
            round_num: 0,
            consensus: false,
            history: Vec::new(),
            teacher_parsed_response: None,
            revision_feedback: None,
            teacher_feedback: None,
            results: AgentResults::default(),
        }
    }
}

macro_rules! impl_has_results {
    ($($state:ty),*) => {
        $(impl HasResults for $state {
            fn results(&self) -> &AgentResults {
                &self.results
            }

            fn results_mut(&mut self) -> &mut AgentResults {
                &mut self.results
            }
        })*
    };
}

impl_has_results!(SingleState, PipelineState, ConsensusState);

/// Final state returned by any orchestration
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Single(SingleState),
    Pipeline(PipelineState),
    Consensus(ConsensusState),
}

impl WorkflowState {
    pub fn kind(&self) -> OrchestrationKind {
        match self {
            WorkflowState::Single(_) => OrchestrationKind::Single,
            WorkflowState::Pipeline(_) => OrchestrationKind::Pipeline,
            WorkflowState::Consensus(_) => OrchestrationKind::Consensus,
        }
    }

    pub fn request(&self) -> &WorkflowRequest {
        match self {
            WorkflowState::Single(s) => &s.request,
            WorkflowState::Pipeline(s) => &s.request,
            WorkflowState::Consensus(s) => &s.request,
        }
    }

    pub fn results(&self) -> &AgentResults {
        match self {
            WorkflowState::Single(s) => &s.results,
            WorkflowState::Pipeline(s) => &s.results,
            WorkflowState::Consensus(s) => &s.results,
        }
    }

    /// `<agent>_result` keys in invocation order
    pub fn result_keys(&self) -> Vec<&'static str> {
        self.results().keys()
    }

    /// The tutor's latest output, the one shown to the student
    pub fn tutor_result(&self) -> Option<&AgentOutput> {
        self.results().get(AgentRole::Tutor)
    }

    pub fn as_pipeline(&self) -> Option<&PipelineState> {
        match self {
            WorkflowState::Pipeline(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_consensus(&self) -> Option<&ConsensusState> {
        match self {
            WorkflowState::Consensus(s) => Some(s),
            _ => None,
        }
    }

    /// Generic key → value view for serialization boundaries
    pub fn to_map(&self) -> Map<String, Value> {
        let request = self.request();
        let mut map = Map::new();

        map.insert("user_input".into(), json!(request.user_input));
        if let Some(history) = &request.conversation_history {
            map.insert("conversation_history".into(), json!(history));
        }
        if let Some(context) = &request.context {
            map.insert("context".into(), json!(context));
        }

        match self {
            WorkflowState::Single(_) => {}
            WorkflowState::Pipeline(s) => {
                map.insert("stage".into(), json!(s.stage));
            }
            WorkflowState::Consensus(s) => {
                map.insert("round_num".into(), json!(s.round_num));
                map.insert("consensus".into(), json!(s.consensus));
                map.insert("history".into(), json!(s.history));
                if let Some(parsed) = &s.teacher_parsed_response {
                    map.insert("teacher_parsed_response".into(), json!(parsed));
                }
                if let Some(feedback) = &s.revision_feedback {
                    map.insert("revision_feedback".into(), json!(feedback));
                }
            }
        }

        for (role, output) in self.results().iter() {
            map.insert(role.result_key().into(), json!(output));
        }

        map
    }
}

impl From<SingleState> for WorkflowState {
    fn from(state: SingleState) -> Self {
        WorkflowState::Single(state)
    }
}

impl From<PipelineState> for WorkflowState {
    fn from(state: PipelineState) -> Self {
        WorkflowState::Pipeline(state)
    }
}

impl From<ConsensusState> for WorkflowState {
    fn from(state: ConsensusState) -> Self {
        WorkflowState::Consensus(state)
    }
}
