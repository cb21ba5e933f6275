//! OpenAI chat-completions client (the `generate` path).

use super::ProviderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const ENV_API_URL: &str = "SHIKIBU_OPENAI_API_URL";

// OpenAI chat-completions request/response
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Thin client over the hosted chat-completions endpoint.
pub struct OpenAiClient {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Builds a client for the given key. `SHIKIBU_OPENAI_API_URL`
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

    /// One completion round: `[system, user]` in, first choice text out.
    pub async fn complete(
        &self,
        system: &str,
        prompt: &str,
        model: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: system.to_string() },
                ChatMessage { role: "user".to_string(), content: prompt.to_string() },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or(ProviderError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn success_extracts_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "下書きです。"}}]
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test")
            .with_api_url(&format!("{}/v1/chat/completions", server.uri()));
        let text = client.complete("system", "prompt", "gpt-4", 1000, 0.7).await.unwrap();
        assert_eq!(text, "下書きです。");
    }

    #[tokio::test]
    async fn non_success_status_is_degradable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test").with_api_url(&server.uri());
        let err = client.complete("system", "prompt", "gpt-4", 1000, 0.7).await.unwrap_err();
        assert!(err.is_degradable());
    }

    #[tokio::test]
    async fn empty_choices_is_not_degradable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test").with_api_url(&server.uri());
        let err = client.complete("system", "prompt", "gpt-4", 1000, 0.7).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyCompletion));
    }
}
