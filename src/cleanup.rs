//! Fixed regex transformations shared by stage 4 (punctuation cleanup) and
//! stage 6 (default summarizer), per §4.9.
//!
//! Patterns are compiled once behind [`std::sync::LazyLock`], the same
//! static-regex pattern used in
//! `other_examples/4a815d27_Goldziher-kreuzberg__src-token_reduction-core.rs.rs`.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,;:!?])").unwrap());
static WHITESPACE_INSIDE_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([({\[])\s+|\s+([)}\]])").unwrap());
static WHITESPACE_INSIDE_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(["'])\s+|\s+(["'])"#).unwrap());

static RULE_SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[=\-*#]{4,}").unwrap());
static RULE_SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SECTION\s+\d+:(?:\s+(?:[A-Z]{2,}|\d+))+(?=\s+\S*[a-z])").unwrap()
});
static RULE_CAPS_HYPHEN_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]+(?:-[A-Z]+){2,}\b").unwrap());
static RULE_PAREN_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\((?:Imagine|Adding|Assuming|Suppose|Note:).{4,}?\)").unwrap()
});
static RULE_BRACKET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(?:REPEATING|SIMULATING|CONTINUED|NOTE).{4,}?\]").unwrap()
});
static RULE_ELLIPSIS_META: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\.\.\s*\(.*?\)\s*\.\.\.").unwrap());

static COLLAPSE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
static COLLAPSE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n(\s*\n)+").unwrap());

/// Rule 3+7 helper, shared by stage 2's prose normalization and this
/// module's rule 7: collapse runs of 2+ interior spaces to one and runs of
/// 3+ consecutive newlines to exactly two.
pub fn collapse_whitespace_runs(text: &str) -> String {
    let collapsed_spaces = COLLAPSE_SPACES.replace_all(text, " ");
    COLLAPSE_NEWLINES
        .replace_all(&collapsed_spaces, "\n\n")
        .to_string()
}

/// Stage 4: punctuation cleanup. Removes whitespace immediately preceding
/// `.,;:!?`, immediately inside `() [] {}`, and immediately adjacent to `"`
/// and `'` on their inner sides, then trims the full text. Does not
/// collapse interior multi-spaces (stage 2 already did that).
pub fn punctuation_cleanup(text: &str) -> String {
    let step1 = WHITESPACE_BEFORE_PUNCT.replace_all(text, "$1");
    let step2 = WHITESPACE_INSIDE_PARENS.replace_all(&step1, "$1$2");
    let step3 = WHITESPACE_INSIDE_QUOTES.replace_all(&step2, "$1$2");
    step3.trim().to_string()
}

/// Stage 6 default summarizer rules, §4.9 items 1–7, applied in order.
pub fn apply_summarizer_rules(text: &str) -> String {
    let mut result = RULE_SEPARATOR_RUNS.replace_all(text, "").to_string();
    result = RULE_SECTION_HEADER.replace_all(&result, "").to_string();
    result = RULE_CAPS_HYPHEN_MARKER
        .replace_all(&result, |caps: &regex::Captures| {
            let m = caps.get(0).unwrap().as_str();
            if m.len() >= 15 { String::new() } else { m.to_string() }
        })
        .to_string();
    result = RULE_PAREN_META.replace_all(&result, "").to_string();
    result = RULE_BRACKET_META.replace_all(&result, "").to_string();
    result = RULE_ELLIPSIS_META.replace_all(&result, "").to_string();
    collapse_whitespace_runs(&result).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_cleanup_strips_preceding_whitespace() {
        assert_eq!(punctuation_cleanup("hello , world !"), "hello, world!");
    }

    #[test]
    fn punctuation_cleanup_strips_inside_brackets() {
        assert_eq!(punctuation_cleanup("( hello )"), "(hello)");
        assert_eq!(punctuation_cleanup("[ a ]"), "[a]");
        assert_eq!(punctuation_cleanup("{ a }"), "{a}");
    }

    #[test]
    fn punctuation_cleanup_strips_inside_quotes() {
        assert_eq!(punctuation_cleanup("\" hello \""), "\"hello\"");
    }

    #[test]
    fn punctuation_cleanup_trims_ends() {
        assert_eq!(punctuation_cleanup("  hi  "), "hi");
    }

    #[test]
    fn rule_removes_separator_runs() {
        assert_eq!(apply_summarizer_rules("before ==== after"), "before after");
        assert_eq!(apply_summarizer_rules("before ---- after"), "before after");
    }

    #[test]
    fn rule_removes_section_header() {
        let text = "SECTION 1: INTRODUCTION 42 Now some lowercase prose follows.";
        let out = apply_summarizer_rules(text);
        assert!(!out.contains("SECTION"));
        assert!(out.contains("Now some lowercase prose follows."));
    }

    #[test]
    fn rule_removes_long_caps_hyphen_marker() {
        let text = "intro IMPORTANT-CRITICAL-WARNING-MARKER outro";
        let out = apply_summarizer_rules(text);
        assert!(!out.contains("IMPORTANT-CRITICAL-WARNING-MARKER"));
    }

    #[test]
    fn rule_keeps_short_caps_hyphen_marker() {
        let text = "intro A-B-C outro";
        let out = apply_summarizer_rules(text);
        assert!(out.contains("A-B-C"));
    }

    #[test]
    fn rule_removes_paren_meta_comment() {
        let text = "The result holds (Note: this is illustrative only) for all cases.";
        let out = apply_summarizer_rules(text);
        assert!(!out.contains("Note:"));
    }

    #[test]
    fn rule_removes_bracket_meta_comment() {
        let text = "Step one. [CONTINUED from above in detail] Step two.";
        let out = apply_summarizer_rules(text);
        assert!(!out.contains("CONTINUED"));
    }

    #[test]
    fn rule_removes_ellipsis_meta() {
        let text = "before ... (skipping irrelevant detail) ... after";
        let out = apply_summarizer_rules(text);
        assert!(!out.contains("skipping"));
    }

    #[test]
    fn collapse_whitespace_runs_handles_spaces_and_newlines() {
        let text = "a    b\n\n\n\nc";
        let out = collapse_whitespace_runs(text);
        assert_eq!(out, "a b\n\nc");
    }
}
