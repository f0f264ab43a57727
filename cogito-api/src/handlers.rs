//! API route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, error, info};

use cogito_cache::CacheStats;
use cogito_core::constants::FALLBACK_ANSWER;

use crate::dto::{HealthResponse, PredictRequest, PredictResponse};
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// POST /api/v1/predict
///
/// Cache hit returns the stored answer untouched. On a miss the upstream
/// model runs; if it fails, the fixed fallback answer is served *and
/// cached*, so identical prompts replay it until the entry expires.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::validation("text must not be empty"));
    }

    if state.config.enable_cache {
        if let Some(cached) = state.cache.get(&req.text) {
            info!(text = %req.text, "Cache hit for request");
            return Ok(Json(PredictResponse { result: cached }));
        }
    }

    let result = match state.provider.complete(&req.text).await {
        Ok(answer) => {
            info!(text = %req.text, backend = state.provider.name(), "Generated answer");
            answer
        }
        Err(err) => {
            error!(text = %req.text, error = %err, "Inference failed, serving fallback");
            FALLBACK_ANSWER.to_owned()
        }
    };

    if state.config.enable_cache {
        state.cache.set(&req.text, result.clone());
    }

    Ok(Json(PredictResponse { result }))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check endpoint called");
    Json(HealthResponse { status: "ok" })
}

/// GET /api/v1/cache/stats
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// POST /api/v1/cache/clear
pub async fn cache_clear(State(state): State<Arc<AppState>>) -> StatusCode {
    state.cache.clear();
    info!("Cache cleared");
    StatusCode::NO_CONTENT
}
