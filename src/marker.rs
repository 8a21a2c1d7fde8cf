//! Reference-token constants and the sentinel scheme that protects them.
//!
//! Every character that stage 3 inserts into the working text is chosen to
//! sit outside the ASCII/word class so later regex passes (stage 4's
//! punctuation cleanup, stage 6's cleanup rules) never mistake it for
//! ordinary text. Concentrating the sigil/delimiter choice in one file means
//! changing it never scatters across the pipeline.

/// Marks the start of a reference token: `<SIGIL><id>`.
pub const SIGIL: char = '§';
/// Opens the inline annotation on a reference's first occurrence.
pub const OPEN: char = '«';
/// Closes the inline annotation on a reference's first occurrence.
pub const CLOSE: char = '»';

/// Non-printable sentinel interleaved between characters of an inserted
/// reference/annotation so stage 3's own later iterations (and stage 4's
/// whitespace/punctuation regexes) cannot split or damage it.
///
/// U+E000 is a Private Use Area code point: never produced by ordinary
/// text, never merged or interior-matched by the cleanup regexes.
pub const SENTINEL: char = '\u{E000}';

/// Format a bare reference token: `§42`.
pub fn format_reference(id: u64) -> String {
    format!("{SIGIL}{id}")
}

/// Format the first-occurrence inline annotation: `§42«phrase»`.
pub fn format_annotation(id: u64, phrase: &str) -> String {
    format!("{SIGIL}{id}{OPEN}{phrase}{CLOSE}")
}

/// Interleave [`SENTINEL`] between every character of `s`.
///
/// `"§42"` becomes a sequence where no two original characters are adjacent
/// — every downstream regex that targets whitespace or punctuation sees
/// unrelated characters, not the marker, until [`strip_sentinels`] runs.
pub fn protect(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for ch in s.chars() {
        out.push(SENTINEL);
        out.push(ch);
    }
    out
}

/// Remove every [`SENTINEL`] character, restoring the protected text.
pub fn strip_sentinels(s: &str) -> String {
    s.chars().filter(|&c| c != SENTINEL).collect()
}

/// True if `word` begins with the reference sigil, once sentinels are
/// stripped — used by stage 5 to recognize a (possibly still-protected)
/// reference token so it is never dropped as a stop word.
pub fn starts_with_sigil(word: &str) -> bool {
    strip_sentinels(word).starts_with(SIGIL)
}

/// True if `word` contains either annotation delimiter, once sentinels are
/// stripped.
pub fn contains_delimiter(word: &str) -> bool {
    let stripped = strip_sentinels(word);
    stripped.contains(OPEN) || stripped.contains(CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_and_annotation_format() {
        assert_eq!(format_reference(1), "§1");
        assert_eq!(format_annotation(1, "hello world"), "§1«hello world»");
    }

    #[test]
    fn protect_then_strip_round_trips() {
        let original = "§12«the quick fox»";
        let protected = protect(original);
        assert_ne!(protected, original);
        assert_eq!(strip_sentinels(&protected), original);
    }

    #[test]
    fn protected_marker_survives_whitespace_regex() {
        // No two original characters are adjacent after protection, so a
        // regex targeting raw whitespace can't match inside the sequence.
        let protected = protect("a b");
        assert!(!protected.contains("a b"));
    }

    #[test]
    fn sigil_detection_ignores_sentinels() {
        let word = protect("§7");
        assert!(starts_with_sigil(&word));
        assert!(!starts_with_sigil("plain"));
    }

    #[test]
    fn delimiter_detection_ignores_sentinels() {
        let word = protect("«phrase»");
        assert!(contains_delimiter(&word));
        assert!(!contains_delimiter("plain"));
    }
}
