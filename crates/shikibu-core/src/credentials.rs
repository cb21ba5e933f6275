//! Provider credential discovery.
//!
//! The presence of each key selects the live path for its action; a missing
//! or blank variable means that action serves canned fallback text. Keys
//! stay in the backend process only — the frontend never sees them.

/// Selects the live OpenAI path for `generate`.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Selects the live Anthropic path for `learn`.
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// Credentials snapshot taken once at startup.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl ProviderCredentials {
    /// Reads both keys from the environment. Blank values count as absent.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env_opt(ENV_OPENAI_API_KEY),
            anthropic_api_key: env_opt(ENV_ANTHROPIC_API_KEY),
        }
    }

    /// No credentials at all; every action serves fallback text.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when at least one live provider path is available.
    pub fn has_any(&self) -> bool {
        self.openai_api_key.is_some() || self.anthropic_api_key.is_some()
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
