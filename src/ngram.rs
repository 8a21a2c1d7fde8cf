//! N-gram mining (stage 3's input).
//!
//! Splits text on runs of whitespace, discards empty pieces, lowercases
//! each word, forms every contiguous `n`-word window, and counts
//! occurrences. The per-`n` frequency threshold reflects the tokenizer cost
//! of a short reference versus the phrase it would replace (§4.5).

use ahash::AHashMap;

/// Minimum occurrence count required to keep an `n`-gram, per §4.5.
pub fn threshold_for(n: usize) -> usize {
    match n {
        2 => 5,
        3 => 4,
        4 => 3,
        5 => 3,
        _ => 2,
    }
}

/// Find all lowercase, whitespace-joined `n`-word windows in `text` that
/// occur at least `min_count` times. Returned in no particular order; stage
/// 3 is responsible for sorting candidates.
pub fn find(text: &str, n: usize, min_count: usize) -> AHashMap<String, usize> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();

    let mut counts: AHashMap<String, usize> = AHashMap::new();
    if n == 0 || words.len() < n {
        return counts;
    }

    for window in words.windows(n) {
        let phrase = window.join(" ");
        *counts.entry(phrase).or_insert(0) += 1;
    }

    counts.retain(|_, count| *count >= min_count);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_spec_table() {
        assert_eq!(threshold_for(2), 5);
        assert_eq!(threshold_for(3), 4);
        assert_eq!(threshold_for(4), 3);
        assert_eq!(threshold_for(5), 3);
        assert_eq!(threshold_for(6), 2);
        assert_eq!(threshold_for(20), 2);
    }

    #[test]
    fn finds_repeated_bigram_above_threshold() {
        let text = "cat dog cat dog cat dog cat dog cat dog";
        let found = find(text, 2, 5);
        assert_eq!(found.get("cat dog"), Some(&5));
    }

    #[test]
    fn excludes_bigram_below_threshold() {
        let text = "cat dog cat dog cat dog cat dog"; // 4 occurrences
        let found = find(text, 2, 5);
        assert!(found.get("cat dog").is_none());
    }

    #[test]
    fn exact_threshold_count_is_included() {
        let text = "a b a b a b"; // 3 occurrences
        let found = find(text, 2, 3);
        assert_eq!(found.get("a b"), Some(&3));
    }

    #[test]
    fn matching_is_case_insensitive_on_the_canonical_form() {
        let text = "Cat Dog cat dog CAT DOG cat dog cat dog";
        let found = find(text, 2, 4);
        assert_eq!(found.get("cat dog"), Some(&4));
    }

    #[test]
    fn empty_text_has_no_ngrams() {
        let found = find("", 2, 1);
        assert!(found.is_empty());
    }

    #[test]
    fn fewer_than_n_words_has_no_ngrams() {
        let found = find("only one", 3, 1);
        assert!(found.is_empty());
    }
}
