//! Covers §7's one fatal, caller-visible error: `compress` before `init`.
//!
//! This lives in its own test binary specifically so the tokenizer's
//! process-global `OnceLock` (`src/tokenizer.rs`) starts unset — any test
//! sharing a binary with another test that calls `init()` first would make
//! this assertion unreliable.

use compression_prompt::{CompressionEngine, CompressionError, PipelineOptions};

#[test]
fn compress_before_init_returns_not_initialized() {
    let engine = CompressionEngine::new();
    let result = engine.compress("hello", PipelineOptions::default());
    assert!(matches!(result, Err(CompressionError::NotInitialized)));
}
