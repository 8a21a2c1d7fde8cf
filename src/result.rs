//! The structured output of a [`crate::CompressionEngine::compress`] call (C8).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dictionary::Dictionary;

/// Diagnostic counters attached to every [`CompressionResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompressionMetadata {
    /// Character length of the original input.
    pub original_length: usize,
    /// Character length of the final compressed text.
    pub compressed_length: usize,
    /// Total n-grams discovered across all stage-3 window lengths.
    pub ngrams_found: usize,
    /// N-grams actually substituted in (passed the ROI check).
    pub ngrams_replaced: usize,
    /// N-grams discovered but rejected by the ROI check.
    pub ngrams_skipped_roi: usize,
}

/// The full record produced by a single `compress` call.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionResult {
    /// The final text after all requested stages.
    pub compressed_text: String,
    /// Alias of `compressed_text`: the dictionary is inline, there is no
    /// separate block to append.
    pub compressed_with_dictionary: String,
    /// Reference token → phrase it abbreviates.
    pub dictionary: Dictionary,
    /// Exact `cl100k_base` token count of the original input.
    pub original_tokens: u32,
    /// Exact `cl100k_base` token count of `compressed_text`.
    pub compressed_tokens: u32,
    /// `compressed_tokens / original_tokens`, rounded to 3 decimals; `1.0`
    /// when `original_tokens` is zero.
    pub compression_ratio: f64,
    /// `(1 - compression_ratio) * 100`, rounded to 1 decimal.
    pub compression_percentage: f64,
    /// `original_tokens - compressed_tokens`.
    pub saved_tokens: i64,
    /// Per-stage `tokens_before - tokens_after`, keyed by stage ordinal
    /// (1-6). May be negative if a stage grows the token count.
    pub stage_token_savings: BTreeMap<u8, i64>,
    /// Per-stage intermediate text, keyed by stage ordinal (1-6).
    pub stage_texts: BTreeMap<u8, String>,
    /// Diagnostic counters.
    pub metadata: CompressionMetadata,
}

impl CompressionResult {
    /// Round `compressed_tokens / original_tokens` to 3 decimals, per §4.8.
    pub(crate) fn ratio(original_tokens: u32, compressed_tokens: u32) -> f64 {
        if original_tokens == 0 {
            return 1.0;
        }
        let raw = compressed_tokens as f64 / original_tokens as f64;
        (raw * 1000.0).round() / 1000.0
    }

    /// Round `(1 - ratio) * 100` to 1 decimal, per §4.8.
    pub(crate) fn percentage(ratio: f64) -> f64 {
        let raw = (1.0 - ratio) * 100.0;
        (raw * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_one_when_original_is_empty() {
        assert_eq!(CompressionResult::ratio(0, 0), 1.0);
    }

    #[test]
    fn ratio_rounds_to_three_decimals() {
        // 7/9 = 0.777...
        assert_eq!(CompressionResult::ratio(9, 7), 0.778);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let ratio = CompressionResult::ratio(9, 7);
        assert_eq!(CompressionResult::percentage(ratio), 22.2);
    }

    #[test]
    fn full_compression_yields_zero_ratio() {
        assert_eq!(CompressionResult::ratio(10, 0), 0.0);
        assert_eq!(CompressionResult::percentage(0.0), 100.0);
    }
}
