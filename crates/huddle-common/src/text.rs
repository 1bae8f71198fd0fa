//! Text helpers for inspecting and sanitizing signaling payloads.

use regex::Regex;

/// Replaces every non-overlapping literal occurrence of `pattern` in `text`
/// with `replacement`.
///
/// An empty pattern leaves the input unchanged.
pub fn replace_literal(text: &str, pattern: &str, replacement: &str) -> String {
    if pattern.is_empty() {
        return text.to_string();
    }
    text.replace(pattern, replacement)
}

/// Returns the first substring of `text` matching the regex `pattern`.
///
/// Returns `None` when nothing matches or the pattern does not compile.
pub fn match_first(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_without_occurrence_returns_input_unchanged() {
        assert_eq!(replace_literal("hello world", "xyz", "_"), "hello world");
        assert_eq!(replace_literal("", "xyz", "_"), "");
    }

    #[test]
    fn replace_empty_pattern_is_identity() {
        assert_eq!(replace_literal("hello", "", "spam"), "hello");
        assert_eq!(replace_literal("", "", "spam"), "");
    }

    #[test]
    fn replace_handles_multiple_occurrences() {
        assert_eq!(replace_literal("a-b-c", "-", "+"), "a+b+c");
        assert_eq!(replace_literal("aaaa", "aa", "b"), "bb");
    }

    #[test]
    fn replace_treats_pattern_literally() {
        // No regex semantics on the replace side.
        assert_eq!(replace_literal("a.c", ".", "!"), "a!c");
        assert_eq!(replace_literal("abc", ".", "!"), "abc");
    }

    #[test]
    fn replace_then_match_yields_no_match() {
        let cleaned = replace_literal("token=abc;token=def", "token", "key");
        assert_eq!(match_first(&cleaned, "token"), None);
    }

    #[test]
    fn match_first_finds_regex_match() {
        assert_eq!(
            match_first("room:42;user:bob", r"room:\d+"),
            Some("room:42".to_string())
        );
    }

    #[test]
    fn match_first_returns_none_without_match() {
        assert_eq!(match_first("user:bob", r"room:\d+"), None);
        assert_eq!(match_first("", "a"), None);
    }

    #[test]
    fn match_first_tolerates_invalid_pattern() {
        assert_eq!(match_first("anything", "(unclosed"), None);
    }
}
