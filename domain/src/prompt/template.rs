//! Prompt templates with `{field}` placeholders

use crate::orchestration::input::AgentInput;
use serde::Serialize;

/// An optional block appended to the user prompt when its field is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSection {
    pub key: &'static str,
    pub heading: &'static str,
}

/// System + user prompt pair for one agent, fixed at agent construction
///
/// The user template may reference any [`AgentInput`] field as `{field}`.
/// Placeholders naming absent fields render as empty strings. Text in
/// braces that is not a plain identifier is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    system: String,
    user: String,
    sections: Vec<PromptSection>,
}

/// Prompt ready to send to a language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

impl RenderedPrompt {
    /// Both messages as one block, for backends without chat roles
    pub fn to_text(&self) -> String {
        if self.system.is_empty() {
            self.user.clone()
        } else {
            format!("{}\n\n{}", self.system, self.user)
        }
    }
}

impl PromptTemplate {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            sections: Vec::new(),
        }
    }

    /// Append `heading:\n<value>` when `key` is present and non-empty
    pub fn with_section(mut self, key: &'static str, heading: &'static str) -> Self {
        self.sections.push(PromptSection { key, heading });
        self
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn sections(&self) -> &[PromptSection] {
        &self.sections
    }

    /// Placeholder names referenced by the user template, in order
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.user.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_field_name(&after[..close]) => {
                    names.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                _ => rest = after,
            }
        }
        names
    }

    pub fn render(&self, input: &AgentInput) -> RenderedPrompt {
        let mut user = substitute(&self.user, input);

        for section in &self.sections {
            if let Some(value) = input.get(section.key).filter(|v| !v.trim().is_empty()) {
                user.push_str(&format!("\n\n{}:\n{}", section.heading, value));
            }
        }

        RenderedPrompt {
            system: self.system.clone(),
            user,
        }
    }
}

fn substitute(template: &str, input: &AgentInput) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_field_name(&after[..close]) => {
                out.push_str(input.get(&after[..close]).unwrap_or_default());
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_field_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::input::keys;

    #[test]
    fn test_render_substitutes_fields() {
        let template = PromptTemplate::new("sys", "Request: {user_input}\nHistory: {conversation_history}");
        let input = AgentInput::new("fix my loop").with(keys::CONVERSATION_HISTORY, "Student: hi");

        let rendered = template.render(&input);
        assert_eq!(rendered.system, "sys");
        assert_eq!(rendered.user, "Request: fix my loop\nHistory: Student: hi");
    }

    #[test]
    fn test_absent_field_renders_empty() {
        let template = PromptTemplate::new("", "[{conversation_history}] {user_input}");
        let rendered = template.render(&AgentInput::new("q"));
        assert_eq!(rendered.user, "[] q");
    }

    #[test]
    fn test_non_field_braces_are_kept() {
        let template = PromptTemplate::new("", "Reply with {\"consensus\": true} for {user_input}");
        let rendered = template.render(&AgentInput::new("q"));
        assert_eq!(rendered.user, "Reply with {\"consensus\": true} for q");
    }

    #[test]
    fn test_sections_only_when_present() {
        let template = PromptTemplate::new("", "{user_input}")
            .with_section(keys::EXPERT_RESPONSE, "Expert notes")
            .with_section(keys::REVISION_FEEDBACK, "Feedback");
        let input = AgentInput::new("q")
            .with(keys::EXPERT_RESPONSE, "check bounds")
            .with(keys::REVISION_FEEDBACK, "  ");

        let rendered = template.render(&input);
        assert_eq!(rendered.user, "q\n\nExpert notes:\ncheck bounds");
    }

    #[test]
    fn test_placeholders() {
        let template = PromptTemplate::new("", "{a_b} {not a field} {user_input}");
        assert_eq!(template.placeholders(), vec!["a_b", "user_input"]);
    }

    #[test]
    fn test_to_text() {
        let prompt = RenderedPrompt {
            system: "sys".into(),
            user: "hi".into(),
        };
        assert_eq!(prompt.to_text(), "sys\n\nhi");
    }
}
