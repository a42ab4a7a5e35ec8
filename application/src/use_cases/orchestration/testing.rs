//! Test doubles shared by the orchestration and use-case tests

use crate::ports::agent_logger::{AgentCall, AgentLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::WorkflowProgressNotifier;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tutor_domain::{AgentRole, ModelReply, RenderedPrompt};

/// Replies with the rendered user prompt, so the student's request shows up
/// in the tutor's answer
pub(crate) struct EchoGateway;

#[async_trait]
impl LlmGateway for EchoGateway {
    async fn invoke(&self, prompt: &RenderedPrompt) -> Result<ModelReply, GatewayError> {
        Ok(ModelReply::text(prompt.user.clone()))
    }
}

/// Returns scripted replies in call order and records every prompt
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<ModelReply, String>>>,
    prompts: Mutex<Vec<RenderedPrompt>>,
}

impl ScriptedGateway {
    pub(crate) fn new<I, S>(texts: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_replies(
            texts
                .into_iter()
                .map(|text| Ok(ModelReply::text(text)))
                .collect(),
        )
    }

    pub(crate) fn from_replies(replies: Vec<Result<ModelReply, String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn prompts(&self) -> Vec<RenderedPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn invoke(&self, prompt: &RenderedPrompt) -> Result<ModelReply, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(e)) => Err(GatewayError::RequestFailed(e)),
            None => Ok(ModelReply::text("(no more responses)")),
        }
    }
}

/// Captures agent calls and milestones
#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub(crate) calls: Mutex<Vec<(String, Vec<&'static str>, Option<String>)>>,
    pub(crate) messages: Mutex<Vec<String>>,
}

impl AgentLogger for RecordingLogger {
    fn log_agent(&self, call: &AgentCall<'_>) {
        self.calls.lock().unwrap().push((
            call.agent_name.to_string(),
            call.input_keys.clone(),
            call.user_preview.clone(),
        ));
    }

    fn log(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

impl RecordingLogger {
    pub(crate) fn agent_order(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _, _)| name.clone())
            .collect()
    }
}

/// Captures progress callbacks as strings
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) events: Mutex<Vec<String>>,
}

impl WorkflowProgressNotifier for RecordingProgress {
    fn on_agent_start(&self, role: AgentRole) {
        self.events.lock().unwrap().push(format!("start:{}", role));
    }

    fn on_agent_complete(&self, role: AgentRole, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done:{}:{}", role, success));
    }

    fn on_round_complete(&self, round: usize, consensus: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("round:{}:{}", round, consensus));
    }
}
