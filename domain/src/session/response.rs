//! Turning a finished workflow into what the student sees
//!
//! Whatever orchestration ran, the tutor's latest output is the response.

use crate::orchestration::state::WorkflowState;

/// Text of the tutor's latest result, empty if the tutor never ran
///
/// Uses the same unwrapping rule as every other agent output, so an
/// unusual reply shape degrades to its stringified payload.
pub fn extract_final_response(state: &WorkflowState) -> String {
    state
        .tutor_result()
        .map(|output| output.text())
        .unwrap_or_default()
}

/// Bodies of fenced code blocks in `text`
///
/// With a `language`, only blocks tagged with it (case-insensitive) or left
/// untagged are returned. An unterminated fence runs to the end of the text.
///
/// # Examples
///
/// ```
/// use tutor_domain::session::response::extract_code_blocks;
///
/// let text = "Try this:\n```python\nfor i in range(3):\n    print(i)\n```\n";
/// assert_eq!(extract_code_blocks(text, Some("python")), vec!["for i in range(3):\n    print(i)\n"]);
/// assert!(extract_code_blocks(text, Some("go")).is_empty());
/// ```
pub fn extract_code_blocks(text: &str, language: Option<&str>) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();
        match current.take() {
            None => {
                if let Some(tag) = trimmed.strip_prefix("```") {
                    current = Some((tag.trim().to_string(), String::new()));
                }
            }
            Some((tag, mut body)) => {
                if trimmed.starts_with("```") {
                    if tag_matches(&tag, language) {
                        blocks.push(body);
                    }
                } else {
                    body.push_str(line);
                    body.push('\n');
                    current = Some((tag, body));
                }
            }
        }
    }

    if let Some((tag, body)) = current
        && tag_matches(&tag, language)
    {
        blocks.push(body);
    }

    blocks
}

fn tag_matches(tag: &str, language: Option<&str>) -> bool {
    match language {
        None => true,
        Some(language) => tag.is_empty() || tag.eq_ignore_ascii_case(language),
    }
}
