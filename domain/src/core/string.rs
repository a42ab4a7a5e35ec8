//! String utilities for the domain layer.

/// Preview a string for logs: at most `max_chars` characters, followed by
/// `...` when anything was cut off.
///
/// Counts characters rather than bytes so multi-byte input never splits.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_is_unchanged() {
        assert_eq!(preview("hello", 80), "hello");
    }

    #[test]
    fn test_preview_exact_length_is_unchanged() {
        let s = "a".repeat(80);
        assert_eq!(preview(&s, 80), s);
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        let s = "a".repeat(81);
        let p = preview(&s, 80);
        assert_eq!(p.len(), 83);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_preview_multibyte() {
        assert_eq!(preview("あのね", 2), "あの...");
        assert_eq!(preview("👋🌍", 5), "👋🌍");
    }
}
