//! Agent output value objects and text unwrapping
//!
//! A language model backend may hand back a bare string, a chain result
//! exposing `output`, a chat message exposing `content`, or something
//! else entirely. [`AgentOutput::text`] unwraps all of them with one rule:
//!
//! 1. an `output` field
//! 2. a plain string
//! 3. a `content` field
//! 4. otherwise the JSON-stringified payload (soft failure, never raises)

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Raised when a reply has no recognizable textual field
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Malformed output from {agent}: no text in {payload}")]
pub struct MalformedAgentOutput {
    pub agent: String,
    pub payload: String,
}

/// Raw reply from a language model (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelReply {
    /// Plain completion text
    Text(String),
    /// Chain-style result exposing `output`
    Output { output: String },
    /// Chat-message-style result exposing `content`
    Content { content: String },
    /// Anything else the backend produced
    Raw(Value),
}

impl ModelReply {
    pub fn text(text: impl Into<String>) -> Self {
        ModelReply::Text(text.into())
    }

    pub fn output(output: impl Into<String>) -> Self {
        ModelReply::Output {
            output: output.into(),
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        ModelReply::Content {
            content: content.into(),
        }
    }

    /// Textual payload, if the reply has one
    pub fn try_text(&self) -> Option<&str> {
        match self {
            ModelReply::Output { output } => Some(output),
            ModelReply::Text(text) => Some(text),
            ModelReply::Content { content } => Some(content),
            ModelReply::Raw(value) => raw_text(value),
        }
    }

    fn stringified(&self) -> String {
        match self {
            ModelReply::Raw(value) => value.to_string(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

/// Apply the unwrapping order to an arbitrary JSON value
fn raw_text(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map
            .get("output")
            .and_then(Value::as_str)
            .or_else(|| map.get("content").and_then(Value::as_str)),
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Result of one agent invocation: `{agent_name: reply}` (Value Object)
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutput {
    agent: String,
    reply: ModelReply,
}

impl AgentOutput {
    pub fn new(agent: impl Into<String>, reply: ModelReply) -> Self {
        Self {
            agent: agent.into(),
            reply,
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn reply(&self) -> &ModelReply {
        &self.reply
    }

    /// Strict unwrapping; fails when no textual field is present
    pub fn try_text(&self) -> Result<String, MalformedAgentOutput> {
        self.reply
            .try_text()
            .map(str::to_string)
            .ok_or_else(|| MalformedAgentOutput {
                agent: self.agent.clone(),
                payload: self.reply.stringified(),
            })
    }

    /// Tolerant unwrapping; degrades to the stringified payload
    pub fn text(&self) -> String {
        match self.try_text() {
            Ok(text) => text,
            Err(e) => {
                warn!("{}", e);
                e.payload
            }
        }
    }
}

impl Serialize for AgentOutput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.agent, &self.reply)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_plain_string() {
        let out = AgentOutput::new("tutor_agent", ModelReply::text("hello"));
        assert_eq!(out.text(), "hello");
    }

    #[test]
    fn test_unwraps_output_attribute() {
        let out = AgentOutput::new("tutor_agent", ModelReply::output("from chain"));
        assert_eq!(out.text(), "from chain");
    }

    #[test]
    fn test_unwraps_content_attribute() {
        let out = AgentOutput::new("tutor_agent", ModelReply::content("from message"));
        assert_eq!(out.text(), "from message");
    }

    #[test]
    fn test_raw_prefers_output_over_content() {
        let reply = ModelReply::Raw(json!({"content": "second", "output": "first"}));
        assert_eq!(AgentOutput::new("expert_agent", reply).text(), "first");
    }

    #[test]
    fn test_malformed_falls_back_to_stringified() {
        let out = AgentOutput::new("teacher_agent", ModelReply::Raw(json!({"tokens": 12})));
        assert!(out.try_text().is_err());
        assert_eq!(out.text(), r#"{"tokens":12}"#);
    }

    #[test]
    fn test_serializes_as_single_entry_map() {
        let out = AgentOutput::new("tutor_agent", ModelReply::content("hi"));
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value, json!({"tutor_agent": {"content": "hi"}}));
    }

    #[test]
    fn test_reply_deserializes_each_shape() {
        let text: ModelReply = serde_json::from_value(json!("plain")).unwrap();
        assert_eq!(text, ModelReply::text("plain"));
        let output: ModelReply = serde_json::from_value(json!({"output": "o"})).unwrap();
        assert_eq!(output, ModelReply::output("o"));
        let content: ModelReply = serde_json::from_value(json!({"content": "c"})).unwrap();
        assert_eq!(content, ModelReply::content("c"));
    }
}
