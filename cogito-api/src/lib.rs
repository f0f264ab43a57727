//! # Cogito API Server
//!
//! REST API exposing a reasoning text-generation model behind API-key
//! authentication, with a TTL response cache in front of the expensive
//! inference call.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/predict` - Generate (or replay) an answer for a prompt
//! - `GET /api/v1/cache/stats` - Cache introspection
//! - `POST /api/v1/cache/clear` - Drop all cached answers
//! - `GET /health` - Health check
//!
//! All routes require the `x-api-key` header.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cogito_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 8000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod auth;
mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use cogito_core::error::Result;

/// API server for cogito.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    ///
    /// Fails if the configuration is unusable (e.g. a zero cache TTL).
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("cogito API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration read from the environment.
pub async fn start_server(port: u16) -> Result<()> {
    let config = ApiConfig::from_env();
    let server = ApiServer::new(config)?;
    server.run(([0, 0, 0, 0], port)).await?;
    Ok(())
}
