//! API-key authentication middleware.
//!
//! Every route sits behind this check; a failed or missing key
//! short-circuits before the cache or the model is touched.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use cogito_core::constants::API_KEY_HEADER;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects requests whose `x-api-key` header does not match the
/// configured pre-shared key.
///
/// A server without a configured key rejects everything rather than
/// serving unauthenticated.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.auth_key.as_deref() else {
        warn!("Rejecting request: no API key configured");
        return Err(ApiError::forbidden("API key not configured"));
    };

    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if key == expected => Ok(next.run(req).await),
        Some(_) => {
            warn!("Unauthorized access attempt with invalid API key");
            Err(ApiError::forbidden("Invalid API key"))
        }
        None => {
            warn!("Unauthorized access attempt without API key");
            Err(ApiError::forbidden("Missing API key"))
        }
    }
}
