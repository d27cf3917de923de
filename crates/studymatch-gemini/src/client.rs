// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini generateContent API.
//!
//! Provides [`GeminiClient`] which handles request construction, API key
//! authentication via query parameter, and transient error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use studymatch_core::StudyMatchError;

use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
///
/// Manages connection pooling and retry logic for transient errors
/// (429, 500, 503). The API key travels as a `?key=` query parameter,
/// which is how the generateContent endpoint authenticates.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    max_retries: u32,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key
    /// * `api_url` - Full generateContent endpoint URL
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: String,
        api_url: String,
        timeout: Duration,
    ) -> Result<Self, StudyMatchError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| StudyMatchError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            max_retries: 1,
            base_url: api_url,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a prompt and returns the first candidate's generated text.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second
    /// delay. An envelope with no candidates is a provider error.
    pub async fn generate(&self, prompt: &str) -> Result<String, StudyMatchError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying generateContent after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .query(&[("key", self.api_key.as_str())])
                .json(&request)
                .send()
                .await
                .map_err(|e| StudyMatchError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "generateContent response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| StudyMatchError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let envelope: GenerateContentResponse = serde_json::from_str(&body)
                    .map_err(|e| StudyMatchError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return envelope
                    .text()
                    .map(str::to_string)
                    .ok_or_else(|| StudyMatchError::Provider {
                        message: "response carried no candidates".to_string(),
                        source: None,
                    });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(StudyMatchError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            return Err(StudyMatchError::Provider {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| StudyMatchError::Provider {
            message: "generateContent failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "test-api-key".into(),
            "https://unused.invalid".into(),
            Duration::from_secs(6),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    fn candidate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })
    }

    #[tokio::test]
    async fn generate_returns_candidate_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(query_param("key", "test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "ping"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("pong")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let text = client.generate("ping").await.unwrap();
        assert_eq!(text, "pong");
    }

    #[tokio::test]
    async fn generate_retries_on_429() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("after retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let text = client.generate("ping").await.unwrap();
        assert_eq!(text, "after retry");
    }

    #[tokio::test]
    async fn generate_fails_on_400() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate("ping").await.unwrap_err();
        assert!(matches!(err, StudyMatchError::Provider { .. }));
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn generate_exhausts_retries_on_503() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.generate("ping").await.is_err());
    }

    #[tokio::test]
    async fn empty_candidates_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate("ping").await.unwrap_err();
        assert!(err.to_string().contains("no candidates"));
    }
}
