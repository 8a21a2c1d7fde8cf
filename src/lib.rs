//! # Compression Core
//!
//! A deterministic six-stage pipeline that shrinks an LLM prompt's
//! `cl100k_base` token count while preserving enough of its meaning for a
//! model to reconstruct intent.
//!
//! ## Architecture
//!
//! 1. **Phrase substitution**: a fixed table of verbose phrases rewritten
//!    to shorter equivalents.
//! 2. **Structural normalization**: JSON regions are minified and pruned,
//!    prose regions have their whitespace collapsed.
//! 3. **N-gram compression**: frequent multi-word phrases are abbreviated
//!    behind a reference token, gated by a token-cost ROI check.
//! 4. **Punctuation cleanup**: whitespace around punctuation and brackets
//!    is tidied.
//! 5. **Semantic pruning** *(aggressive only)*: stop words are dropped.
//! 6. **Summarization** *(aggressive only)*: delegated to a pluggable
//!    [`Summarizer`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use compression_prompt::{CompressionEngine, PipelineOptions};
//!
//! let engine = CompressionEngine::new();
//! engine.init();
//! let result = engine.compress(input, PipelineOptions::default())?;
//!
//! println!("Saved {} tokens ({:.1}%)", result.saved_tokens, result.compression_percentage);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::RwLock;

pub mod cleanup;
pub mod dictionary;
pub mod error;
pub mod marker;
pub mod ngram;
pub mod pipeline;
pub mod result;
pub mod roi;
pub mod segmenter;
pub mod substitution;
pub mod summarizer;
pub mod tokenizer;

pub use dictionary::Dictionary;
pub use error::CompressionError;
pub use pipeline::PipelineOptions;
pub use result::{CompressionMetadata, CompressionResult};
pub use substitution::{BuiltinLoader, SubstitutionLoader, SubstitutionTable};
pub use summarizer::{DefaultSummarizer, Summarizer};
pub use tokenizer::TokenCounter;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry point: owns the loaded substitution table and the installed
/// summarizer backend, and runs the pipeline on demand.
///
/// `init`/`is_ready`/`compress` mirror the token counter's own lazy-init
/// discipline (§6): construction is cheap, `init` must run once before the
/// first `compress`, and repeated `init` calls are harmless.
pub struct CompressionEngine {
    substitutions: SubstitutionTable,
    summarizer: RwLock<Box<dyn Summarizer>>,
}

impl CompressionEngine {
    /// Build an engine with the built-in substitution table and the
    /// default rule-based summarizer. Does not touch the tokenizer.
    pub fn new() -> Self {
        Self {
            substitutions: SubstitutionTable::builtin(),
            summarizer: RwLock::new(Box::new(DefaultSummarizer)),
        }
    }

    /// Build an engine from a custom substitution loader, falling back to
    /// the builtin table on failure (§4.2).
    pub fn with_loader(loader: &dyn SubstitutionLoader) -> Self {
        Self {
            substitutions: SubstitutionTable::load(loader),
            summarizer: RwLock::new(Box::new(DefaultSummarizer)),
        }
    }

    /// Load the `cl100k_base` vocabulary if it isn't loaded yet. Idempotent;
    /// safe to call from multiple threads. Must run before the first
    /// [`Self::compress`].
    pub fn init(&self) -> &Self {
        TokenCounter::init();
        self
    }

    /// Whether the tokenizer is ready for use.
    pub fn is_ready(&self) -> bool {
        TokenCounter.is_initialized()
    }

    /// Install a custom summarization backend for stage 6. Not safe to call
    /// concurrently with [`Self::compress`] (mirrors §5's rule for the
    /// substitution table's `add`).
    pub fn set_summarizer(&mut self, summarizer: Box<dyn Summarizer>) {
        *self.summarizer.write().expect("summarizer lock poisoned") = summarizer;
    }

    /// Run the full pipeline on `text`.
    ///
    /// # Errors
    /// Returns [`CompressionError::NotInitialized`] if [`Self::init`] has
    /// not run yet. Every other internal failure degrades gracefully per
    /// §7 and never reaches this return type.
    pub fn compress(
        &self,
        text: &str,
        options: PipelineOptions,
    ) -> Result<CompressionResult, CompressionError> {
        if !self.is_ready() {
            return Err(CompressionError::NotInitialized);
        }
        let counter = TokenCounter::init();
        let summarizer = self.summarizer.read().expect("summarizer lock poisoned");
        Ok(pipeline::run(
            text,
            options,
            counter,
            &self.substitutions,
            summarizer.as_ref(),
        ))
    }
}

impl Default for CompressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_compress_succeeds() {
        // The `NotInitialized` error path itself needs a fresh process (the
        // tokenizer's `OnceLock` is shared across every test in this
        // binary); it's covered separately in `tests/not_initialized.rs`.
        let engine = CompressionEngine::new();
        engine.init();
        assert!(engine.is_ready());
        assert!(engine.compress("hello", PipelineOptions::default()).is_ok());
    }

    #[test]
    fn default_engine_compresses_a_known_phrase() {
        let engine = CompressionEngine::new();
        engine.init();
        let result = engine
            .compress(
                "We did this in order to improve performance.",
                PipelineOptions::default(),
            )
            .unwrap();
        assert!(result.compressed_text.contains(" to improve"));
        assert!(!result.compressed_text.to_lowercase().contains("in order to"));
    }

    #[test]
    fn custom_summarizer_is_used_in_aggressive_mode() {
        struct Shout;
        impl Summarizer for Shout {
            fn summarize(&self, text: &str) -> String {
                text.to_uppercase()
            }
        }

        let mut engine = CompressionEngine::new();
        engine.init();
        engine.set_summarizer(Box::new(Shout));
        let result = engine
            .compress("hello there", PipelineOptions { aggressive: true })
            .unwrap();
        assert_eq!(result.compressed_text, result.compressed_text.to_uppercase());
    }
}
