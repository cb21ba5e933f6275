//! Anthropic messages client (the `learn` path).

use super::ProviderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ENV_API_URL: &str = "SHIKIBU_ANTHROPIC_API_URL";

/// Pinned messages-API revision.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

// Anthropic messages request/response
#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<MessagesMessage>,
}

#[derive(Serialize)]
struct MessagesMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Thin client over the hosted messages endpoint.
pub struct AnthropicClient {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Builds a client for the given key. `SHIKIBU_ANTHROPIC_API_URL`
    /// overrides the endpoint (tests point it at a local mock server).
    pub fn new(api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key: api_key.trim().to_string(),
            api_url: std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            client,
        }
    }

    /// Overrides the endpoint URL.
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// One analysis round: a single user message in, first content block out.
    pub async fn analyze(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let body = MessagesRequest {
            model: model.to_string(),
            max_tokens,
            messages: vec![MessagesMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let parsed: MessagesResponse = response.json().await?;
        parsed
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or(ProviderError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn success_extracts_first_content_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "丁寧で簡潔な文体です。"}]
            })))
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-api-key")
            .with_api_url(&format!("{}/v1/messages", server.uri()));
        let text = client.analyze("分析して", "claude-3-haiku-20240307", 1000).await.unwrap();
        assert_eq!(text, "丁寧で簡潔な文体です。");
    }

    #[tokio::test]
    async fn non_success_status_is_degradable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = AnthropicClient::new("test-api-key").with_api_url(&server.uri());
        let err = client.analyze("分析して", "claude-3-haiku-20240307", 1000).await.unwrap_err();
        assert!(err.is_degradable());
    }
}
