//! Hosted text-completion service
//!
//! The wire format is the classic `/completions` endpoint: a model, a free-text
//! prompt, a length cap and a sampling temperature go in; a list of candidate
//! completions comes out.

use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Body of a completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Body of a completion response; unknown fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One candidate completion
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub text: Option<String>,
}

impl CompletionResponse {
    /// Text of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().and_then(|choice| choice.text.as_deref())
    }
}

/// A hosted request/response completion endpoint
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

/// Client for an OpenAI-compatible `/completions` endpoint
pub struct OpenAiCompletions {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiCompletions {
    /// Create a client against the default endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, None)
    }

    /// Create a client with custom base URL and an optional request timeout
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    fn build_url(&self) -> String {
        format!("{}/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletions {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let url = self.build_url();
        tracing::debug!("POST {} (model {})", url, request.model);

        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(Error::Api {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        let response = serde_json::from_str(&body)?;

        Ok(response)
    }
}

/// Stand-in used when no completion client could be built; every request fails
pub struct UnavailableCompletions {
    reason: String,
}

impl UnavailableCompletions {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CompletionService for UnavailableCompletions {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        Err(Error::ServiceUnavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_wire_format() {
        let request = CompletionRequest {
            model: "gpt-4".to_string(),
            prompt: "Hello".to_string(),
            max_tokens: 100,
            temperature: 0.5,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "gpt-4",
                "prompt": "Hello",
                "max_tokens": 100,
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_response_first_text() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"id": "cmpl-1", "choices": [{"text": "  First.  ", "index": 0}, {"text": "Second"}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text(), Some("  First.  "));
    }

    #[test]
    fn test_response_without_choices() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.first_text(), None);

        let response: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());

        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices": [{"index": 0}]}"#).unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let client = OpenAiCompletions::with_base_url("key", "http://localhost:8080/v1/", None)
            .unwrap();
        assert_eq!(client.build_url(), "http://localhost:8080/v1/completions");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_sending() {
        let client = OpenAiCompletions::with_base_url("  ", "http://127.0.0.1:9", None).unwrap();
        let result = client
            .complete(CompletionRequest {
                model: "gpt-4".to_string(),
                prompt: "x".to_string(),
                max_tokens: 1,
                temperature: 0.0,
            })
            .await;
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }
}
