//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

/// Request body for prediction.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Input text for the model. Used verbatim as the cache key, so
    /// identical prompts share a cached answer.
    pub text: String,
}

/// Response body for prediction.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Generated (or cached) answer.
    pub result: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: &'static str,
}
