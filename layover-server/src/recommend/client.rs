//! Language-model HTTP client.
//!
//! Speaks the OpenAI-compatible chat completions API, so any provider or
//! local server exposing `/chat/completions` can be used.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::{ChatMessage, Refinement, TransitPlan};

use super::error::RecommendError;
use super::parse::{parse_plan, parse_refinement};
use super::prompt::{plan_messages, refine_messages};
use super::provider::{PlanContext, Recommender};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

/// Default base URL for the chat completions API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model name.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the language-model client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token for authentication
    pub api_key: String,
    /// Base URL for the API, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on reply length
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: Some(1500),
            timeout_secs: 60,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Chat completions client.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl LlmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, RecommendError> {
        let mut headers = HeaderMap::new();

        let token = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| RecommendError::NotConfigured("invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a conversation and return the text of the first choice.
    pub async fn complete(&self, messages: Vec<WireMessage>) -> Result<String, RecommendError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            "Requesting completion from {} ({} messages)",
            self.model,
            request.messages.len()
        );

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RecommendError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RecommendError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| RecommendError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        completion
            .first_content()
            .map(str::to_string)
            .ok_or(RecommendError::EmptyReply)
    }
}

#[async_trait]
impl Recommender for LlmClient {
    async fn recommend(&self, context: &PlanContext) -> Result<TransitPlan, RecommendError> {
        let content = self.complete(plan_messages(context)).await?;
        parse_plan(&content)
    }

    async fn refine(
        &self,
        context: &PlanContext,
        current: &TransitPlan,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<Refinement, RecommendError> {
        let content = self
            .complete(refine_messages(context, current, history, message))
            .await?;
        parse_refinement(&content, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = LlmConfig::new("sk-test")
            .with_base_url("http://localhost:11434/v1/")
            .with_model("llama3")
            .with_temperature(0.2)
            .with_timeout(5);
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout_secs, 5);

        let client = LlmClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434/v1");
        assert_eq!(client.model(), "llama3");
    }

    #[test]
    fn defaults() {
        let config = LlmConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn rejects_unprintable_key() {
        let err = LlmClient::new(LlmConfig::new("bad\nkey")).unwrap_err();
        assert!(matches!(err, RecommendError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let client = LlmClient::new(
            LlmConfig::new("sk-test")
                .with_base_url("http://127.0.0.1:1")
                .with_timeout(2),
        )
        .unwrap();
        let err = client
            .complete(vec![WireMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendError::Http(_)));
    }
}
