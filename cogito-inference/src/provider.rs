//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use cogito_core::constants::DEFAULT_MODEL;
use cogito_core::error::{CogitoError, Result};
use cogito_core::traits::InferenceProvider;
use cogito_core::types::{ChatMessage, GenerationBudget};

/// Upstream client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the chat-completions server (e.g. a local vLLM instance).
    pub base_url: String,
    /// Model identifier passed through to the upstream.
    pub model: String,
    /// Bearer token, if the upstream requires one.
    pub api_token: Option<String>,
    /// Request timeout in seconds, applied to each pass separately.
    pub timeout_seconds: u64,
    /// Token budgets for the two generation passes.
    pub budget: GenerationBudget,
}

const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:8001";

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_token: None,
            timeout_seconds: 120,
            budget: GenerationBudget::default(),
        }
    }
}

impl UpstreamConfig {
    /// Creates a config pointing at the given base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Checks that the base URL is well-formed.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| CogitoError::ConfigError(format!("invalid upstream URL '{}': {}", self.base_url, e)))?;
        Ok(())
    }
}

/// Two-pass reasoning provider.
///
/// Mirrors the serving recipe of small reasoning models: the first pass
/// generates a chain of reasoning, the second pass generates the answer
/// with that reasoning in context. Only the answer is returned.
pub struct UpstreamProvider {
    config: UpstreamConfig,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl UpstreamProvider {
    /// Creates a provider with default configuration.
    pub fn new() -> Self {
        Self::with_config(UpstreamConfig::default())
    }

    /// Creates a provider with custom configuration.
    pub fn with_config(config: UpstreamConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Runs one generation pass and returns its text.
    async fn chat(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens,
        };

        let mut builder = self.http_client.post(self.endpoint()).json(&request);
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                CogitoError::InferenceTimeout {
                    seconds: self.config.timeout_seconds,
                }
            } else {
                CogitoError::InferenceRequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CogitoError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CogitoError::InferenceRequestFailed(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(CogitoError::EmptyCompletion)
    }
}

impl Default for UpstreamProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceProvider for UpstreamProvider {
    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut messages = vec![ChatMessage::user(prompt)];

        let reasoning = self
            .chat(&messages, self.config.budget.reasoning_tokens)
            .await?;
        debug!(chars = reasoning.len(), "Reasoning pass complete");

        messages.push(ChatMessage::reasoning(reasoning));
        let answer = self
            .chat(&messages, self.config.budget.response_tokens)
            .await?;

        Ok(answer)
    }

    fn name(&self) -> &'static str {
        "upstream"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    async fn provider_for(server: &MockServer) -> UpstreamProvider {
        UpstreamProvider::with_config(UpstreamConfig::with_base_url(server.uri()))
    }

    #[tokio::test]
    async fn test_complete_runs_two_passes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("42")))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let answer = provider.complete("What is 6 * 7?").await.unwrap();
        assert_eq!(answer, "42");

        // Second pass carries the reasoning from the first.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
        let messages = second["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["role"], "reasoning");
        assert_eq!(messages[1]["content"], "42");
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.complete("hi").await.unwrap_err();
        assert!(matches!(
            err,
            CogitoError::UpstreamStatus { status: 503, .. }
        ));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.complete("hi").await.unwrap_err();
        assert!(matches!(err, CogitoError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_a_request_failure() {
        // Nothing listens on this port.
        let provider = UpstreamProvider::with_config(UpstreamConfig::with_base_url(
            "http://127.0.0.1:9",
        ));

        let err = provider.complete("hi").await.unwrap_err();
        assert!(matches!(err, CogitoError::InferenceRequestFailed(_)));
    }

    #[test]
    fn test_config_validation() {
        assert!(UpstreamConfig::default().validate().is_ok());
        assert!(UpstreamConfig::with_base_url("not a url").validate().is_err());
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let provider =
            UpstreamProvider::with_config(UpstreamConfig::with_base_url("http://host:8001/"));
        assert_eq!(provider.endpoint(), "http://host:8001/v1/chat/completions");
    }
}
