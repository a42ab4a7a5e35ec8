//! Output formatter trait

use tutor_application::TurnOutput;

/// Trait for formatting the result of one tutor turn
pub trait OutputFormatter {
    /// Every agent's contribution and the final answer
    fn format(&self, question: &str, output: &TurnOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &TurnOutput) -> String;

    /// The tutor's answer only (concise output)
    fn format_response_only(&self, output: &TurnOutput) -> String;
}
