//! App state: config, response cache, inference provider.

use std::sync::Arc;
use std::time::Duration;

use cogito_cache::ResponseCache;
use cogito_core::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_MODEL};
use cogito_core::error::Result;
use cogito_core::traits::InferenceProvider;
use cogito_inference::{UpstreamConfig, UpstreamProvider};

/// Server configuration, normally loaded from the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Pre-shared key clients must present in the `x-api-key` header.
    /// With no key configured the server rejects every request.
    pub auth_key: Option<String>,
    /// Base URL of the upstream chat-completions engine.
    pub upstream_url: String,
    /// Model identifier passed to the upstream.
    pub model: String,
    /// TTL for cached responses, in seconds.
    pub cache_ttl_seconds: u64,
    /// Whether responses are cached at all.
    pub enable_cache: bool,
}

const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:8001";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_key: None,
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            model: DEFAULT_MODEL.into(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECS,
            enable_cache: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment, with `.env` support.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            auth_key: std::env::var("COGITO_AUTH_KEY").ok(),
            upstream_url: std::env::var("COGITO_UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.into()),
            model: std::env::var("COGITO_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            cache_ttl_seconds: std::env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            enable_cache: std::env::var("ENABLE_CACHE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}

/// Shared state handed to every handler.
///
/// The cache lives here, constructed once and passed explicitly; nothing
/// in the service reaches for a process-wide global.
pub struct AppState {
    /// Server configuration.
    pub config: ApiConfig,
    /// TTL cache for generated answers.
    pub cache: ResponseCache,
    /// Backend that actually runs the model.
    pub provider: Arc<dyn InferenceProvider>,
}

impl AppState {
    /// Builds state from config, wiring the default upstream provider.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let upstream = UpstreamConfig::with_base_url(config.upstream_url.clone())
            .with_model(config.model.clone());
        upstream.validate()?;

        let provider = Arc::new(UpstreamProvider::with_config(upstream));
        Self::with_provider(config, provider)
    }

    /// Builds state around an explicit provider (used by tests).
    pub fn with_provider(config: ApiConfig, provider: Arc<dyn InferenceProvider>) -> Result<Self> {
        let cache = ResponseCache::new(Duration::from_secs(config.cache_ttl_seconds))?;

        Ok(Self {
            config,
            cache,
            provider,
        })
    }
}
