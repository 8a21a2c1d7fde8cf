//! Exact BPE token counting against the `cl100k_base` vocabulary.
//!
//! The vocabulary is large (the merge table alone is multiple megabytes), so
//! it is loaded lazily behind a [`OnceLock`] and shared for the lifetime of
//! the process, the same pattern used for tokenizer singletons in
//! `other_examples/16f53c21_infernet-org-m2m-protocol__src-tokenizer-counter.rs.rs`.
//! Readers may call concurrently once initialized; there are no writers
//! after init.

use std::sync::OnceLock;
use thiserror::Error;
use tiktoken_rs::CoreBPE;

static ENCODER: OnceLock<CoreBPE> = OnceLock::new();

/// Raised internally when a caller asks for an exact count before
/// [`TokenCounter::init`] has run. Never crosses the public API: the
/// pipeline driver checks [`TokenCounter::is_initialized`] up front and
/// returns [`crate::error::CompressionError::NotInitialized`] instead.
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// The `cl100k_base` vocabulary has not been loaded yet.
    #[error("tokenizer not initialized")]
    NotInitialized,
}

/// Thread-safe, lazily-initialized `cl100k_base` token counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenCounter;

impl TokenCounter {
    /// Load the `cl100k_base` vocabulary if it hasn't been loaded yet.
    /// Idempotent and safe to call from multiple threads concurrently.
    pub fn init() -> &'static Self {
        ENCODER.get_or_init(|| {
            tiktoken_rs::cl100k_base().expect("failed to load cl100k_base vocabulary")
        });
        &TokenCounter
    }

    /// Whether the vocabulary has been loaded.
    pub fn is_initialized(&self) -> bool {
        ENCODER.get().is_some()
    }

    /// Exact token count under `cl100k_base`. Empty input is always 0.
    ///
    /// # Errors
    /// Returns [`TokenizerError::NotInitialized`] if [`TokenCounter::init`]
    /// has not run yet. Callers that need exact counts (the ROI evaluator,
    /// the pipeline driver) must never swallow this into the coarse
    /// estimate — only logging call sites may fall back to
    /// [`TokenCounter::estimate`].
    pub fn count(&self, text: &str) -> Result<u32, TokenizerError> {
        if text.is_empty() {
            return Ok(0);
        }
        let bpe = ENCODER.get().ok_or(TokenizerError::NotInitialized)?;
        Ok(bpe.encode_with_special_tokens(text).len() as u32)
    }

    /// Coarse `⌈len/4⌉` estimate, valid before initialization. Only meant
    /// for logging contexts (§9); ROI decisions must use [`Self::count`].
    pub fn estimate(text: &str) -> u32 {
        (text.len() as u32).div_ceil(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> &'static TokenCounter {
        TokenCounter::init()
    }

    #[test]
    fn empty_input_is_zero_tokens() {
        let c = counter();
        assert_eq!(c.count("").unwrap(), 0);
    }

    #[test]
    fn nonempty_input_has_positive_count() {
        let c = counter();
        assert!(c.count("hello, world!").unwrap() > 0);
    }

    #[test]
    fn counting_is_deterministic() {
        let c = counter();
        let text = "The quick brown fox jumps over the lazy dog.";
        assert_eq!(c.count(text).unwrap(), c.count(text).unwrap());
    }

    #[test]
    fn estimate_rounds_up_and_never_zero_for_nonempty() {
        assert_eq!(TokenCounter::estimate("abcd"), 1);
        assert_eq!(TokenCounter::estimate("abcde"), 2);
        assert!(TokenCounter::estimate("a") >= 1);
    }

    #[test]
    fn init_is_idempotent_and_marks_ready() {
        let c = counter();
        assert!(c.is_initialized());
        let c2 = TokenCounter::init();
        assert!(c2.is_initialized());
    }
}
