//! API route configuration.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
///
/// Every route, health check included, sits behind the API-key middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Prediction
        .route("/api/v1/predict", post(handlers::predict))
        // Cache administration
        .route("/api/v1/cache/stats", get(handlers::cache_stats))
        .route("/api/v1/cache/clear", post(handlers::cache_clear))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use cogito_core::constants::{API_KEY_HEADER, FALLBACK_ANSWER};
    use cogito_core::error::{CogitoError, Result as CoreResult};
    use cogito_core::traits::InferenceProvider;

    use super::*;
    use crate::state::ApiConfig;

    const TEST_KEY: &str = "test-key";

    struct StubProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubProvider {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InferenceProvider for StubProvider {
        async fn complete(&self, prompt: &str) -> CoreResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CogitoError::InferenceRequestFailed("boom".into()))
            } else {
                Ok(format!("answer: {prompt}"))
            }
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn test_config() -> ApiConfig {
        ApiConfig {
            auth_key: Some(TEST_KEY.into()),
            ..ApiConfig::default()
        }
    }

    fn test_app_with(config: ApiConfig, provider: Arc<StubProvider>) -> Router {
        let state = Arc::new(AppState::with_provider(config, provider).unwrap());
        create_router(state)
    }

    fn test_app(provider: Arc<StubProvider>) -> Router {
        test_app_with(test_config(), provider)
    }

    fn get_request(uri: &str, key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn predict_request(text: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, TEST_KEY)
            .body(Body::from(
                serde_json::json!({ "text": text }).to_string(),
            ))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app(StubProvider::ok());

        let response = app.oneshot(get_request("/health", Some(TEST_KEY))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected() {
        let app = test_app(StubProvider::ok());

        let response = app.oneshot(get_request("/health", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_API_KEY");
    }

    #[tokio::test]
    async fn test_invalid_api_key_rejected_before_cache() {
        let provider = StubProvider::ok();
        let app = test_app(provider.clone());

        let response = app
            .oneshot(get_request("/health", Some("wrong-key")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_key_rejects_everything() {
        let config = ApiConfig {
            auth_key: None,
            ..ApiConfig::default()
        };
        let app = test_app_with(config, StubProvider::ok());

        let response = app.oneshot(get_request("/health", Some(TEST_KEY))).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_predict_miss_then_hit() {
        let provider = StubProvider::ok();
        let app = test_app(provider.clone());

        let first = app.clone().oneshot(predict_request("hello")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(body_json(first).await["result"], "answer: hello");
        assert_eq!(provider.calls(), 1);

        // Identical prompt is served from cache; the model does not run again.
        let second = app.oneshot(predict_request("hello")).await.unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(body_json(second).await["result"], "answer: hello");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_distinct_prompts_each_run_the_model() {
        let provider = StubProvider::ok();
        let app = test_app(provider.clone());

        app.clone().oneshot(predict_request("one")).await.unwrap();
        app.oneshot(predict_request("two")).await.unwrap();

        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_fallback_is_cached_and_replayed() {
        let provider = StubProvider::failing();
        let app = test_app(provider.clone());

        let first = app.clone().oneshot(predict_request("bad")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(body_json(first).await["result"], FALLBACK_ANSWER);
        assert_eq!(provider.calls(), 1);

        // The cached fallback replays without another inference attempt.
        let second = app.oneshot(predict_request("bad")).await.unwrap();
        assert_eq!(body_json(second).await["result"], FALLBACK_ANSWER);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let app = test_app(StubProvider::ok());

        let response = app.oneshot(predict_request("   ")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_cache_clear_forces_recompute() {
        let provider = StubProvider::ok();
        let app = test_app(provider.clone());

        app.clone().oneshot(predict_request("hello")).await.unwrap();
        assert_eq!(provider.calls(), 1);

        let clear = Request::builder()
            .method("POST")
            .uri("/api/v1/cache/clear")
            .header(API_KEY_HEADER, TEST_KEY)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(clear).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        app.oneshot(predict_request("hello")).await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_stats_reports_entries() {
        let app = test_app(StubProvider::ok());

        app.clone().oneshot(predict_request("hello")).await.unwrap();

        let response = app
            .oneshot(get_request("/api/v1/cache/stats", Some(TEST_KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["entries"], 1);
        assert_eq!(body["live"], 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_runs_the_model() {
        let config = ApiConfig {
            enable_cache: false,
            ..test_config()
        };
        let provider = StubProvider::ok();
        let app = test_app_with(config, provider.clone());

        app.clone().oneshot(predict_request("hello")).await.unwrap();
        app.oneshot(predict_request("hello")).await.unwrap();

        assert_eq!(provider.calls(), 2);
    }
}
