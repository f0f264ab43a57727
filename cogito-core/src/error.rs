//! Error types for cogito.
//!
//! This module provides the error hierarchy using `thiserror`.
//! All errors include context and are designed to be actionable.

use thiserror::Error;

/// Result type alias using `CogitoError`.
pub type Result<T> = std::result::Result<T, CogitoError>;

/// Main error type for all cogito operations.
#[derive(Debug, Error)]
pub enum CogitoError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION & VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error (bad TTL, malformed upstream URL, missing key).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // INFERENCE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The request to the upstream engine could not be completed.
    #[error("Inference request failed: {0}")]
    InferenceRequestFailed(String),

    /// The upstream engine answered with a non-success status.
    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus {
        /// HTTP status code reported by the upstream.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The upstream answered successfully but carried no completion text.
    #[error("Upstream response missing completion text")]
    EmptyCompletion,

    /// The upstream did not answer within the configured timeout.
    #[error("Inference timed out after {seconds}s")]
    InferenceTimeout {
        /// Configured timeout, in seconds.
        seconds: u64,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CogitoError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CogitoError::InferenceRequestFailed(_)
                | CogitoError::InferenceTimeout { .. }
                | CogitoError::UpstreamStatus { status: 500..=599, .. }
        )
    }

    /// Returns true if this error originated in the inference path.
    pub fn is_inference_error(&self) -> bool {
        matches!(
            self,
            CogitoError::InferenceRequestFailed(_)
                | CogitoError::UpstreamStatus { .. }
                | CogitoError::EmptyCompletion
                | CogitoError::InferenceTimeout { .. }
        )
    }
}
