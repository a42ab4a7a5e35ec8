//! Conversation domain entities

use crate::orchestration::config::TutorConfig;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who wrote a message in a tutoring conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    #[serde(alias = "assistant")]
    Tutor,
    System,
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn tutor(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tutor,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Render prior turns for the agents' `conversation_history` field
///
/// Student and tutor messages become `Student: ...` / `Tutor: ...` entries
/// separated by a blank line; other roles are skipped.
pub fn format_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter_map(|m| match m.role {
            MessageRole::User => Some(format!("Student: {}", m.content)),
            MessageRole::Tutor => Some(format!("Tutor: {}", m.content)),
            MessageRole::System => None,
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Default conversation id: local time as `YYYYMMDD_HHMM`
pub fn new_conversation_id(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M").to_string()
}

/// Candidate ids for a conversation started at `now`: the base id, then
/// `<base>_2`, `<base>_3` and so on
pub fn conversation_id_candidates(now: DateTime<Local>) -> impl Iterator<Item = String> {
    let base = new_conversation_id(now);
    std::iter::once(base.clone()).chain((2usize..).map(move |n| format!("{}_{}", base, n)))
}

/// A persisted tutoring conversation (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<ChatMessage>,
    pub config: TutorConfig,
    pub update_time: DateTime<Local>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, config: TutorConfig) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            config,
            update_time: Local::now(),
        }
    }

    /// Start a conversation with a time-based id
    pub fn start(config: TutorConfig) -> Self {
        let now = Local::now();
        Self {
            id: new_conversation_id(now),
            messages: Vec::new(),
            config,
            update_time: now,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.update_time = Local::now();
    }

    /// History for the next turn: every message before the latest one
    pub fn history_before_last(&self) -> String {
        match self.messages.split_last() {
            Some((_, earlier)) => format_history(earlier),
            None => String::new(),
        }
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            config: self.config.clone(),
            message_count: self.messages.len(),
            update_time: self.update_time,
        }
    }
}

/// Listing entry for a stored conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub config: TutorConfig,
    pub message_count: usize,
    pub update_time: DateTime<Local>,
}
