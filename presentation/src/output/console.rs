//! Console output formatter for tutor turns

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use serde_json::{Value, json};
use tutor_application::TurnOutput;
use tutor_domain::{
    AgentRole, ChatMessage, Conversation, ConversationSummary, MessageRole, WorkflowState,
};

/// Formats tutor turns and conversations for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete turn: each agent's output, rounds, final answer
    pub fn format(question: &str, output: &TurnOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Agent Tutor"));
        text.push('\n');

        text.push_str(&format!("{} {}\n", "Question:".cyan().bold(), question));

        if let Some(state) = &output.state {
            text.push_str(&format!(
                "{} {}\n",
                "Orchestration:".cyan().bold(),
                state.kind()
            ));
            text.push_str(&Self::agent_sections(state));
            text.push_str(&Self::rounds_section(state));
        }

        if let Some(error) = &output.error {
            text.push_str(&Self::section_header("Error"));
            text.push_str(&format!("\n{}\n", error.red()));
        }

        text.push_str(&Self::section_header("Tutor's Answer"));
        text.push_str(&format!("\n{}\n", output.response));

        text.push_str(&Self::footer());
        text
    }

    fn agent_sections(state: &WorkflowState) -> String {
        let mut text = Self::section_header("Agents");
        for (role, agent_output) in state.results().iter() {
            text.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", role.display_name()).yellow().bold(),
                agent_output.text()
            ));
        }
        text
    }

    fn rounds_section(state: &WorkflowState) -> String {
        let Some(consensus) = state.as_consensus() else {
            return String::new();
        };

        let mut text = Self::section_header("Consensus Rounds");
        for record in &consensus.history {
            let verdict = if record.consensus {
                "agreed".green()
            } else {
                "revise".yellow()
            };
            text.push_str(&format!("  Round {}: {}\n", record.round_num, verdict));
            if !record.feedback.is_empty() {
                text.push_str(&Self::indent(&record.feedback, "    "));
                text.push('\n');
            }
        }

        let summary = if consensus.consensus {
            format!("Consensus reached at round #{}", consensus.round_num).green()
        } else {
            format!("No consensus after {} rounds", consensus.round_num).yellow()
        };
        text.push_str(&format!("\n{}\n", summary));
        text
    }

    /// Format as JSON: the reply plus the serialized workflow state
    pub fn format_json(output: &TurnOutput) -> String {
        let state = output
            .state
            .as_ref()
            .map(|s| Value::Object(s.to_map()))
            .unwrap_or(Value::Null);

        let value = json!({
            "response": output.response,
            "success": output.is_success(),
            "error": output.error,
            "state": state,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the tutor's answer only (concise output)
    pub fn format_response_only(output: &TurnOutput) -> String {
        if output.is_success() {
            output.response.clone()
        } else {
            output.response.red().to_string()
        }
    }

    /// One line per stored conversation
    pub fn format_conversation_list(summaries: &[ConversationSummary]) -> String {
        if summaries.is_empty() {
            return "No saved conversations.".dimmed().to_string();
        }

        let mut text = format!("{}\n", "Saved conversations:".cyan().bold());
        for summary in summaries {
            text.push_str(&format!(
                "  {}  {} / {} / {}  ({} messages, updated {})\n",
                summary.id.bold(),
                summary.config.language,
                summary.config.mode,
                summary.config.orchestration,
                summary.message_count,
                summary.update_time.format("%Y-%m-%d %H:%M")
            ));
        }
        text
    }

    /// The conversation transcript with role labels
    pub fn format_history(conversation: &Conversation) -> String {
        if conversation.messages.is_empty() {
            return "No messages yet.".dimmed().to_string();
        }

        conversation
            .messages
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_message(message: &ChatMessage) -> String {
        let label = match message.role {
            MessageRole::User => "Student:".cyan().bold(),
            MessageRole::Tutor => format!("{}:", AgentRole::Tutor.display_name())
                .green()
                .bold(),
            MessageRole::System => "System:".dimmed(),
        };
        format!("{}\n{}", label, Self::indent(&message.content, "  "))
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, question: &str, output: &TurnOutput) -> String {
        Self::format(question, output)
    }

    fn format_json(&self, output: &TurnOutput) -> String {
        Self::format_json(output)
    }

    fn format_response_only(&self, output: &TurnOutput) -> String {
        Self::format_response_only(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_domain::{
        AgentOutput, ConsensusState, ModelReply, RoundRecord, TutorConfig, WorkflowRequest,
    };

    fn consensus_output() -> TurnOutput {
        let mut state = ConsensusState::new(WorkflowRequest::new("why is my slice empty?"));
        state.results.record(
            AgentRole::Expert,
            AgentOutput::new("expert_agent", ModelReply::text("append returns a new slice")),
        );
        state.results.record(
            AgentRole::Tutor,
            AgentOutput::new("tutor_agent", ModelReply::text("Assign the result of append.")),
        );
        state.round_num = 2;
        state.consensus = true;
        state.history = vec![
            RoundRecord::new(1, false, "Add an example."),
            RoundRecord::new(2, true, "Good."),
        ];

        TurnOutput {
            response: "Assign the result of append.".to_string(),
            state: Some(state.into()),
            error: None,
        }
    }

    #[test]
    fn test_full_format_lists_agents_and_rounds() {
        let text = ConsoleFormatter::format("why is my slice empty?", &consensus_output());

        assert!(text.contains("why is my slice empty?"));
        assert!(text.contains("Expert"));
        assert!(text.contains("append returns a new slice"));
        assert!(text.contains("Round 1"));
        assert!(text.contains("Add an example."));
        assert!(text.contains("Consensus reached at round #2"));
        assert!(text.contains("Assign the result of append."));
    }

    #[test]
    fn test_json_format_includes_state_map() {
        let text = ConsoleFormatter::format_json(&consensus_output());
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["response"], "Assign the result of append.");
        assert_eq!(value["state"]["user_input"], "why is my slice empty?");
        assert_eq!(value["state"]["round_num"], 2);
        assert!(value["state"].get("tutor_agent_result").is_some());
    }

    #[test]
    fn test_json_format_for_failed_turn() {
        let output = TurnOutput {
            response: "I apologize".to_string(),
            state: None,
            error: Some("model offline".to_string()),
        };
        let value: Value = serde_json::from_str(&ConsoleFormatter::format_json(&output)).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "model offline");
        assert!(value["state"].is_null());
    }

    #[test]
    fn test_history_and_list() {
        let mut conversation = Conversation::new("c1", TutorConfig::default());
        assert!(ConsoleFormatter::format_history(&conversation).contains("No messages"));

        conversation.push(ChatMessage::user("hi"));
        conversation.push(ChatMessage::tutor("hello\nthere"));
        let history = ConsoleFormatter::format_history(&conversation);
        assert!(history.contains("Student:"));
        assert!(history.contains("  there"));

        let list = ConsoleFormatter::format_conversation_list(&[conversation.summary()]);
        assert!(list.contains("c1"));
        assert!(list.contains("2 messages"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
