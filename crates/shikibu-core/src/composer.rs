//! Generate/learn dispatch.
//!
//! Each action takes the live provider path when its credential is
//! configured and degrades to canned text when the credential is absent or
//! the upstream answers with a non-success status. Transport and decode
//! failures are not degradable — they bubble up and become a generic
//! server error at the gateway.

use crate::credentials::ProviderCredentials;
use crate::fallback;
use crate::providers::{AnthropicClient, OpenAiClient, ProviderError};
use thiserror::Error;

/// System instruction for the generate path.
pub const GENERATE_SYSTEM: &str = "あなたは文章作成のプロフェッショナルです。";

/// Prompt header for the learn path; the submitted texts follow, joined by
/// blank lines.
pub const LEARN_PROMPT_HEADER: &str = "以下の文章から文体や好みのパターンを分析してください：";

/// Hosted model used for text generation.
pub const GENERATE_MODEL: &str = "gpt-4";

/// Hosted model used for style analysis.
pub const LEARN_MODEL: &str = "claude-3-haiku-20240307";

/// Output cap shared by both paths.
pub const MAX_TOKENS: u32 = 1000;

/// Sampling temperature for generation.
pub const TEMPERATURE: f32 = 0.7;

/// A successful composer reply. `note` is set exactly when canned fallback
/// text was served instead of a live completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub note: Option<&'static str>,
}

impl Reply {
    fn live(text: String) -> Self {
        Self { text, note: None }
    }

    fn canned(text: String, note: &'static str) -> Self {
        Self { text, note: Some(note) }
    }

    /// True when this reply came from the fallback set.
    pub fn is_fallback(&self) -> bool {
        self.note.is_some()
    }
}

/// Non-degradable composer failure. The gateway logs it and answers with a
/// generic server error; no upstream detail reaches the caller.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ComposerError(#[from] ProviderError);

/// Routes prompts to the hosted providers, with the fallback policy baked in.
/// One instance per process; every call is stateless.
pub struct Composer {
    openai: Option<OpenAiClient>,
    anthropic: Option<AnthropicClient>,
}

impl Composer {
    pub fn new(credentials: &ProviderCredentials) -> Self {
        Self {
            openai: credentials.openai_api_key.as_deref().map(OpenAiClient::new),
            anthropic: credentials.anthropic_api_key.as_deref().map(AnthropicClient::new),
        }
    }

    /// Composer wired from the process environment.
    pub fn from_env() -> Self {
        Self::new(&ProviderCredentials::from_env())
    }

    /// Injects prebuilt clients (tests aim them at a mock server).
    pub fn with_clients(openai: Option<OpenAiClient>, anthropic: Option<AnthropicClient>) -> Self {
        Self { openai, anthropic }
    }

    /// Drafting assistance for a prompt.
    pub async fn generate(&self, prompt: &str) -> Result<Reply, ComposerError> {
        if let Some(client) = &self.openai {
            match client
                .complete(GENERATE_SYSTEM, prompt, GENERATE_MODEL, MAX_TOKENS, TEMPERATURE)
                .await
            {
                Ok(text) => return Ok(Reply::live(text)),
                Err(e) if e.is_degradable() => {
                    tracing::warn!(target: "shikibu::composer", error = %e, "generate degraded to canned text");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Reply::canned(fallback::generate_reply(prompt), fallback::GENERATE_NOTE))
    }

    /// Style analysis over a batch of texts.
    pub async fn learn(&self, texts: &[String]) -> Result<Reply, ComposerError> {
        if let Some(client) = &self.anthropic {
            let prompt = format!("{}\n\n{}", LEARN_PROMPT_HEADER, texts.join("\n\n"));
            match client.analyze(&prompt, LEARN_MODEL, MAX_TOKENS).await {
                Ok(text) => return Ok(Reply::live(text)),
                Err(e) if e.is_degradable() => {
                    tracing::warn!(target: "shikibu::composer", error = %e, "learn degraded to canned text");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Reply::canned(fallback::LEARN_FALLBACK.to_string(), fallback::LEARN_NOTE))
    }
}
