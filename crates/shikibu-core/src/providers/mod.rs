//! Hosted model provider clients.
//!
//! Both clients are thin: one request shape, one response shape, first
//! text block out. Routing between live and fallback text is the
//! composer's job, not theirs.

mod anthropic;
mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use thiserror::Error;

/// Failure modes of an upstream provider call.
///
/// `Status` is the degradable class — the composer serves canned text
/// instead. Everything else aborts the request and surfaces as a generic
/// server error.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Connection, TLS, timeout, or body-decode failure.
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Upstream answered 2xx but the payload carried no usable text.
    #[error("upstream response missing expected content")]
    EmptyCompletion,
}

impl ProviderError {
    /// True when the composer may degrade to canned text instead of failing.
    pub fn is_degradable(&self) -> bool {
        matches!(self, ProviderError::Status { .. })
    }
}
