//! Agent input: the substitution fields handed to one agent invocation

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Field names agents read from their input
pub mod keys {
    pub const USER_INPUT: &str = "user_input";
    pub const CONVERSATION_HISTORY: &str = "conversation_history";
    pub const CONTEXT: &str = "context";
    pub const TUTOR_RESPONSE: &str = "tutor_response";
    pub const EXPERT_RESPONSE: &str = "expert_response";
    pub const EXPERT_ANALYSIS: &str = "expert_analysis";
    pub const TEACHER_FEEDBACK: &str = "teacher_feedback";
    pub const REVISION_FEEDBACK: &str = "revision_feedback";
}

/// Ordered field → text mapping for a single agent call (Value Object)
///
/// Keys keep insertion order; writing an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentInput {
    fields: Vec<(&'static str, String)>,
}

impl AgentInput {
    /// Start an input carrying the student's request
    pub fn new(user_input: impl Into<String>) -> Self {
        let mut input = Self::default();
        input.insert(keys::USER_INPUT, user_input);
        input
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Student request, empty when absent
    pub fn user_input(&self) -> &str {
        self.get(keys::USER_INPUT).unwrap_or_default()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(k, _)| *k).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for AgentInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_keep_insertion_order() {
        let input = AgentInput::new("help")
            .with(keys::EXPERT_RESPONSE, "analysis")
            .with(keys::CONTEXT, "ctx");
        assert_eq!(
            input.keys(),
            vec![keys::USER_INPUT, keys::EXPERT_RESPONSE, keys::CONTEXT]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut input = AgentInput::new("first").with(keys::CONTEXT, "ctx");
        input.insert(keys::USER_INPUT, "second");
        assert_eq!(input.user_input(), "second");
        assert_eq!(input.keys(), vec![keys::USER_INPUT, keys::CONTEXT]);
    }

    #[test]
    fn test_missing_key_is_none() {
        let input = AgentInput::new("q");
        assert!(input.get(keys::TUTOR_RESPONSE).is_none());
        assert!(!input.contains(keys::TUTOR_RESPONSE));
        assert_eq!(AgentInput::default().user_input(), "");
    }

    #[test]
    fn test_serializes_as_map() {
        let input = AgentInput::new("q").with(keys::TUTOR_RESPONSE, "a");
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["user_input"], "q");
        assert_eq!(value["tutor_response"], "a");
    }
}
