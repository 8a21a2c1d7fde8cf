//! Public error type.
//!
//! Per the propagation policy: the pipeline is best-effort. Every internal
//! failure (tokenizer unavailable mid-ROI, summarizer backend failure,
//! loader unavailable) degrades gracefully to an identity transform for the
//! affected stage and is logged, never surfaced. The only error that
//! crosses this boundary is calling [`crate::CompressionEngine::compress`]
//! before initialization.

use thiserror::Error;

/// Errors that can be returned from [`crate::CompressionEngine::compress`].
#[derive(Debug, Error)]
pub enum CompressionError {
    /// `compress` was called before `init`.
    #[error("compression engine not initialized; call init() first")]
    NotInitialized,
}
