//! Consensus parsing for teacher reviews.
//!
//! The teacher is asked to end its review with an explicit marker, but its
//! text is model-generated and may ignore the request. These functions are
//! pure text pattern matching and never fail: text without a recognized
//! marker means "no consensus" with the whole text kept as feedback.
//!
//! # Recognized markers (first match wins)
//!
//! | Marker | Example | Feedback |
//! |--------|---------|----------|
//! | Consensus line | `CONSENSUS: YES` | text without the marker line |
//! | Verdict line | `VERDICT: REVISE` | text without the marker line |
//! | JSON | `{"consensus": true, "feedback": "..."}` | `feedback` field, else the text outside the block |
//!
//! JSON only counts when it is the whole review or a fenced code block, so an
//! object quoted inline in the feedback never decides the verdict.

use super::consensus::{ConsensusMarker, ConsensusVerdict};

/// Parse a teacher review into a consensus flag and structured verdict.
///
/// # Examples
///
/// ```
/// use tutor_domain::quorum::parse_consensus;
///
/// let (consensus, verdict) = parse_consensus("CONSENSUS: YES\nClear and correct.");
/// assert!(consensus);
/// assert_eq!(verdict.feedback, "Clear and correct.");
///
/// let (consensus, verdict) = parse_consensus("The loop bound is still wrong.");
/// assert!(!consensus);
/// assert_eq!(verdict.feedback, "The loop bound is still wrong.");
/// ```
pub fn parse_consensus(text: &str) -> (bool, ConsensusVerdict) {
    if let Some(parsed) = parse_line_marker(text, "CONSENSUS", ConsensusMarker::ConsensusLine) {
        return parsed;
    }

    if let Some(parsed) = parse_line_marker(text, "VERDICT", ConsensusMarker::VerdictLine) {
        return parsed;
    }

    if let Some(parsed) = parse_json_marker(text) {
        return parsed;
    }

    (false, ConsensusVerdict::unmarked(text))
}

fn parse_json_marker(text: &str) -> Option<(bool, ConsensusVerdict)> {
    let trimmed = text.trim();
    if trimmed.starts_with('{')
        && trimmed.ends_with('}')
        && let Some(parsed) = json_verdict(trimmed, "")
    {
        return Some(parsed);
    }

    let lines: Vec<&str> = text.lines().collect();
    fenced_blocks(&lines).into_iter().find_map(|(open, close)| {
        let body = lines[open + 1..close].join("\n");
        let outside = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < open || *i > close)
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join("\n");
        json_verdict(body.trim(), outside.trim())
    })
}

/// Verdict from a JSON object carrying a boolean `consensus` field
fn json_verdict(json: &str, outside: &str) -> Option<(bool, ConsensusVerdict)> {
    let parsed = serde_json::from_str::<serde_json::Value>(json).ok()?;
    let consensus = parsed.get("consensus").and_then(|v| v.as_bool())?;

    let feedback = match parsed.get("feedback").and_then(|v| v.as_str()) {
        Some(feedback) => feedback.to_string(),
        None => outside.to_string(),
    };

    Some((
        consensus,
        ConsensusVerdict::marked(feedback, ConsensusMarker::Json),
    ))
}

/// Line index pairs `(opening fence, closing fence)` of fenced code blocks
fn fenced_blocks(lines: &[&str]) -> Vec<(usize, usize)> {
    let mut blocks = Vec::new();
    let mut open = None;

    for (index, line) in lines.iter().enumerate() {
        if !line.trim_start().starts_with("```") {
            continue;
        }
        match open.take() {
            Some(start) => blocks.push((start, index)),
            None => open = Some(index),
        }
    }

    blocks
}

fn parse_line_marker(
    text: &str,
    keyword: &str,
    marker: ConsensusMarker,
) -> Option<(bool, ConsensusVerdict)> {
    let lines: Vec<&str> = text.lines().collect();

    for (index, line) in lines.iter().enumerate() {
        let Some(value) = marker_value(line, keyword) else {
            continue;
        };
        let Some(consensus) = interpret(&value) else {
            continue;
        };

        let feedback = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join("\n");

        return Some((
            consensus,
            ConsensusVerdict::marked(feedback.trim(), marker),
        ));
    }

    None
}

/// Value following `KEYWORD:` on a line, uppercased, if the line is a marker
fn marker_value(line: &str, keyword: &str) -> Option<String> {
    let cleaned = line
        .trim()
        .trim_start_matches(|c: char| matches!(c, '*' | '#' | '-' | '>' | '_') || c.is_whitespace())
        .to_uppercase();

    let rest = cleaned.strip_prefix(keyword)?;
    let rest = rest.trim_start_matches(|c: char| matches!(c, '*' | '_') || c.is_whitespace());
    let rest = rest.strip_prefix(':').or_else(|| rest.strip_prefix('='))?;

    let value: String = rest
        .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();

    if value.is_empty() { None } else { Some(value) }
}

fn interpret(value: &str) -> Option<bool> {
    match value {
        "YES" | "TRUE" | "AGREE" | "AGREED" | "APPROVE" | "APPROVED" | "ACCEPT" | "REACHED" => {
            Some(true)
        }
        "NO" | "FALSE" | "DISAGREE" | "NOT" | "REVISE" | "REJECT" | "REJECTED" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consensus_line_yes() {
        let (consensus, verdict) =
            parse_consensus("The tutor nailed it.\nCONSENSUS: YES\nNothing to add.");
        assert!(consensus);
        assert_eq!(verdict.marker, Some(ConsensusMarker::ConsensusLine));
        assert_eq!(verdict.feedback, "The tutor nailed it.\nNothing to add.");
    }

    #[test]
    fn test_consensus_line_no() {
        let (consensus, verdict) =
            parse_consensus("CONSENSUS: NO\nExplain why range(len(xs)) stops early.");
        assert!(!consensus);
        assert!(verdict.is_structured());
        assert_eq!(verdict.feedback, "Explain why range(len(xs)) stops early.");
    }

    #[test]
    fn test_consensus_line_markdown_and_case() {
        let (consensus, _) = parse_consensus("**Consensus:** yes, the answer is solid");
        assert!(consensus);

        let (consensus, _) = parse_consensus("## consensus = Agreed");
        assert!(consensus);
    }

    #[test]
    fn test_json_marker() {
        let text = r#"Review follows.
```json
{"consensus": true, "feedback": "Accurate and encouraging."}
```"#;
        let (consensus, verdict) = parse_consensus(text);
        assert!(consensus);
        assert_eq!(verdict.marker, Some(ConsensusMarker::Json));
        assert_eq!(verdict.feedback, "Accurate and encouraging.");
    }

    #[test]
    fn test_json_without_feedback_uses_surrounding_text() {
        let text = "Needs a worked example.\n```json\n{\"consensus\": false}\n```";
        let (consensus, verdict) = parse_consensus(text);
        assert!(!consensus);
        assert_eq!(verdict.marker, Some(ConsensusMarker::Json));
        assert_eq!(verdict.feedback, "Needs a worked example.");
    }

    #[test]
    fn test_whole_text_json() {
        let (consensus, verdict) =
            parse_consensus(r#"  {"consensus": true, "feedback": "Ship it."}  "#);
        assert!(consensus);
        assert_eq!(verdict.feedback, "Ship it.");
    }

    #[test]
    fn test_consensus_line_wins_over_quoted_json() {
        let text = "CONSENSUS: NO\nShow how to read a config such as {\"consensus\": true} with json.loads.";
        let (consensus, verdict) = parse_consensus(text);
        assert!(!consensus);
        assert_eq!(verdict.marker, Some(ConsensusMarker::ConsensusLine));
        assert_eq!(
            verdict.feedback,
            "Show how to read a config such as {\"consensus\": true} with json.loads."
        );
    }

    #[test]
    fn test_inline_json_is_not_a_marker() {
        let text = r#"Try parsing {"consensus": true} yourself."#;
        let (consensus, verdict) = parse_consensus(text);
        assert!(!consensus);
        assert!(!verdict.is_structured());
        assert_eq!(verdict.feedback, text);
    }

    #[test]
    fn test_fenced_verdict_after_stray_braces() {
        let text = "An empty dict {} is falsy.\n```json\n{\"consensus\": true}\n```";
        let (consensus, verdict) = parse_consensus(text);
        assert!(consensus);
        assert_eq!(verdict.marker, Some(ConsensusMarker::Json));
        assert_eq!(verdict.feedback, "An empty dict {} is falsy.");
    }

    #[test]
    fn test_fenced_code_without_verdict_is_skipped() {
        let text = "```python\nprint(1)\n```\n```json\n{\"consensus\": false, \"feedback\": \"Add tests.\"}\n```";
        let (consensus, verdict) = parse_consensus(text);
        assert!(!consensus);
        assert_eq!(verdict.feedback, "Add tests.");
    }

    #[test]
    fn test_json_without_consensus_field_is_ignored() {
        let text = r#"Here is code: {"a": 1}"#;
        let (consensus, verdict) = parse_consensus(text);
        assert!(!consensus);
        assert!(!verdict.is_structured());
        assert_eq!(verdict.feedback, text);
    }

    #[test]
    fn test_verdict_line() {
        let (consensus, verdict) = parse_consensus("VERDICT: APPROVE\nGood job.");
        assert!(consensus);
        assert_eq!(verdict.marker, Some(ConsensusMarker::VerdictLine));

        let (consensus, _) = parse_consensus("Verdict: revise");
        assert!(!consensus);
    }

    #[test]
    fn test_consensus_line_wins_over_verdict_line() {
        let (consensus, verdict) = parse_consensus("VERDICT: APPROVE\nCONSENSUS: NO");
        assert!(!consensus);
        assert_eq!(verdict.marker, Some(ConsensusMarker::ConsensusLine));
    }

    #[test]
    fn test_unstructured_text_is_verbatim_non_consensus() {
        let text = "  The tutor's answer is fine overall,\nbut consensus is hard to judge.  ";
        let (consensus, verdict) = parse_consensus(text);
        assert!(!consensus);
        assert_eq!(verdict.marker, None);
        assert_eq!(verdict.feedback, text);
    }

    #[test]
    fn test_prose_mentioning_keyword_is_not_a_marker() {
        let (consensus, verdict) = parse_consensus("Consensus reached? I am not sure yet.");
        assert!(!consensus);
        assert!(!verdict.is_structured());
    }

    #[test]
    fn test_unknown_marker_value_keeps_scanning() {
        let (consensus, verdict) = parse_consensus("CONSENSUS: maybe\nCONSENSUS: yes");
        assert!(consensus);
        assert_eq!(verdict.feedback, "CONSENSUS: maybe");
    }

    #[test]
    fn test_empty_text() {
        let (consensus, verdict) = parse_consensus("");
        assert!(!consensus);
        assert_eq!(verdict.feedback, "");
    }
}
