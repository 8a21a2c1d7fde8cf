//! The six-stage pipeline driver (C7): orchestrates stages 1-6 in strict
//! order, snapshotting text and token count after each one.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use crate::cleanup;
use crate::dictionary::Dictionary;
use crate::marker;
use crate::ngram;
use crate::result::{CompressionMetadata, CompressionResult};
use crate::roi;
use crate::segmenter;
use crate::substitution::SubstitutionTable;
use crate::summarizer::Summarizer;
use crate::tokenizer::TokenCounter;

/// Per-call options recognized by [`crate::CompressionEngine::compress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Enables stages 5 (semantic pruning) and 6 (summarization). Off by
    /// default.
    pub aggressive: bool,
}

/// Closed stop-word set for stage 5, fixed per §4.7.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "from",
        "as", "a", "an", "is", "it", "this", "that", "was", "were", "be", "been", "are",
    ]
    .into_iter()
    .collect()
});

/// Run the full pipeline on `text` and produce a [`CompressionResult`].
///
/// Assumes `counter` is already initialized; the caller
/// ([`crate::CompressionEngine::compress`]) is responsible for the
/// `NotInitialized` check (§7).
pub fn run(
    text: &str,
    options: PipelineOptions,
    counter: &TokenCounter,
    substitutions: &SubstitutionTable,
    summarizer: &dyn Summarizer,
) -> CompressionResult {
    let original_tokens = count_or_estimate(counter, text);
    let mut tokens_before = original_tokens;
    let mut stage_token_savings = BTreeMap::new();
    let mut stage_texts = BTreeMap::new();
    let mut dictionary = Dictionary::new();

    let mut current = stage1_phrase_substitution(text, substitutions);
    record_stage(
        &mut stage_token_savings,
        &mut stage_texts,
        1,
        &mut tokens_before,
        &current,
        counter,
    );

    current = segmenter::transform(&current);
    record_stage(
        &mut stage_token_savings,
        &mut stage_texts,
        2,
        &mut tokens_before,
        &current,
        counter,
    );

    let stage3 = stage3_ngram_substitution(&current, counter, &mut dictionary);
    current = stage3.text;
    record_stage(
        &mut stage_token_savings,
        &mut stage_texts,
        3,
        &mut tokens_before,
        &current,
        counter,
    );

    current = cleanup::punctuation_cleanup(&current);
    record_stage(
        &mut stage_token_savings,
        &mut stage_texts,
        4,
        &mut tokens_before,
        &current,
        counter,
    );

    if options.aggressive {
        current = stage5_semantic_pruning(&current);
    }
    record_stage(
        &mut stage_token_savings,
        &mut stage_texts,
        5,
        &mut tokens_before,
        &current,
        counter,
    );

    if options.aggressive {
        current = summarizer.summarize(&current);
    }
    record_stage(
        &mut stage_token_savings,
        &mut stage_texts,
        6,
        &mut tokens_before,
        &current,
        counter,
    );

    let compressed_tokens = tokens_before;
    let compression_ratio = CompressionResult::ratio(original_tokens, compressed_tokens);
    let compression_percentage = CompressionResult::percentage(compression_ratio);

    CompressionResult {
        compressed_text: current.clone(),
        compressed_with_dictionary: current.clone(),
        dictionary,
        original_tokens,
        compressed_tokens,
        compression_ratio,
        compression_percentage,
        saved_tokens: original_tokens as i64 - compressed_tokens as i64,
        stage_token_savings,
        stage_texts,
        metadata: CompressionMetadata {
            original_length: text.chars().count(),
            compressed_length: current.chars().count(),
            ngrams_found: stage3.found,
            ngrams_replaced: stage3.replaced,
            ngrams_skipped_roi: stage3.skipped_roi,
        },
    }
}

/// Exact token count when the tokenizer is available, otherwise the coarse
/// estimate (§7 degrades stage accounting, never the caller-facing result).
fn count_or_estimate(counter: &TokenCounter, text: &str) -> u32 {
    match counter.count(text) {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!("tokenizer unavailable; using coarse estimate for stage accounting");
            TokenCounter::estimate(text)
        }
    }
}

fn record_stage(
    stage_token_savings: &mut BTreeMap<u8, i64>,
    stage_texts: &mut BTreeMap<u8, String>,
    stage: u8,
    tokens_before: &mut u32,
    text: &str,
    counter: &TokenCounter,
) {
    let tokens_after = count_or_estimate(counter, text);
    stage_token_savings.insert(stage, *tokens_before as i64 - tokens_after as i64);
    stage_texts.insert(stage, text.to_string());
    *tokens_before = tokens_after;
}

/// Stage 1: apply every substitution-table entry, longest source phrase
/// first, matching case-insensitively and inserting the replacement
/// verbatim.
fn stage1_phrase_substitution(text: &str, table: &SubstitutionTable) -> String {
    let mut result = text.to_string();
    for (source, replacement) in table.mappings() {
        result = replace_case_insensitive(&result, source, replacement);
    }
    result
}

fn replace_case_insensitive(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let lower_haystack = haystack.to_lowercase();
    let lower_needle = needle.to_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    let mut rest_lower: &str = &lower_haystack;
    loop {
        match rest_lower.find(&lower_needle) {
            Some(idx) => {
                out.push_str(&rest[..idx]);
                out.push_str(replacement);
                let consumed = idx + needle.len();
                rest = &rest[consumed..];
                rest_lower = &rest_lower[consumed..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }
    out
}

struct Stage3Outcome {
    text: String,
    found: usize,
    replaced: usize,
    skipped_roi: usize,
}

/// Stage 3: mine n-grams from n=10 down to 2, admit each candidate through
/// the ROI check, and substitute admitted phrases with sentinel-protected
/// reference tokens, recording each into `dictionary`.
fn stage3_ngram_substitution(
    text: &str,
    counter: &TokenCounter,
    dictionary: &mut Dictionary,
) -> Stage3Outcome {
    let mut working = text.to_string();
    let mut next_id: u64 = 1;
    let mut found_total = 0usize;
    let mut replaced_total = 0usize;
    let mut skipped_total = 0usize;

    for n in (2..=10).rev() {
        let threshold = ngram::threshold_for(n);
        let candidates = ngram::find(&working, n, threshold);
        found_total += candidates.len();

        let mut sorted: Vec<(String, usize)> = candidates.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.len().cmp(&a.0.len())));

        for (phrase, _found_count) in sorted {
            let words: Vec<&str> = working.split_whitespace().collect();
            let phrase_words: Vec<&str> = phrase.split(' ').collect();
            let occurrences = count_non_overlapping_matches(&words, &phrase_words);
            if occurrences == 0 {
                continue;
            }

            let candidate_id = next_id;
            match roi::profitable(counter, &phrase, occurrences, candidate_id) {
                Ok(true) => {
                    working = substitute_with_reference(&words, &phrase_words, &phrase, candidate_id);
                    dictionary.insert(marker::format_reference(candidate_id), phrase);
                    replaced_total += 1;
                    next_id += 1;
                }
                Ok(false) => {
                    skipped_total += 1;
                }
                Err(_) => {
                    tracing::warn!(
                        "tokenizer unavailable during ROI check; aborting n-gram substitution"
                    );
                    return Stage3Outcome {
                        text: marker::strip_sentinels(&working),
                        found: found_total,
                        replaced: replaced_total,
                        skipped_roi: skipped_total,
                    };
                }
            }
        }
    }

    Stage3Outcome {
        text: marker::strip_sentinels(&working),
        found: found_total,
        replaced: replaced_total,
        skipped_roi: skipped_total,
    }
}

fn words_match(word: &str, phrase_word: &str) -> bool {
    word.to_lowercase() == phrase_word
}

fn count_non_overlapping_matches(words: &[&str], phrase_words: &[&str]) -> usize {
    let n = phrase_words.len();
    if n == 0 || words.len() < n {
        return 0;
    }
    let mut count = 0;
    let mut i = 0;
    while i + n <= words.len() {
        if (0..n).all(|k| words_match(words[i + k], phrase_words[k])) {
            count += 1;
            i += n;
        } else {
            i += 1;
        }
    }
    count
}

/// Replace every non-overlapping match of `phrase_words` in `words` with a
/// sentinel-protected reference token: the first match becomes the
/// annotation `<ref><open><phrase><close>`, every later match the bare
/// `<ref>`.
fn substitute_with_reference(
    words: &[&str],
    phrase_words: &[&str],
    phrase: &str,
    ref_id: u64,
) -> String {
    let n = phrase_words.len();
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    let mut seen_first = false;
    let mut i = 0;
    while i < words.len() {
        if i + n <= words.len() && (0..n).all(|k| words_match(words[i + k], phrase_words[k])) {
            let token = if !seen_first {
                seen_first = true;
                marker::protect(&marker::format_annotation(ref_id, phrase))
            } else {
                marker::protect(&marker::format_reference(ref_id))
            };
            out.push(token);
            i += n;
        } else {
            out.push(words[i].to_string());
            i += 1;
        }
    }
    out.join(" ")
}

/// Stage 5 (aggressive only): drop stop words, keeping every reference
/// token, annotation, and whitespace-only normalization intact.
fn stage5_semantic_pruning(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| {
            if marker::starts_with_sigil(word) || marker::contains_delimiter(word) {
                return true;
            }
            let normalized: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if normalized.is_empty() {
                return true;
            }
            !STOP_WORDS.contains(normalized.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
