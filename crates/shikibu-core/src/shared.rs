//! Application configuration and the shared workspace types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder title applied when a document is saved without one.
pub const UNTITLED: &str = "無題";

/// Fixed document tag; the current surfaces only save general writing.
pub const DOC_TYPE_GENERAL: &str = "general";

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat transcript entry. The transcript is append-only for the
/// lifetime of a session and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A saved canvas document. Stored as an ordered JSON list under a single
/// key (`localStorage` on the web surface, the sled [`crate::OutputStore`]
/// on the desktop surface) and only ever appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDocument {
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl SavedDocument {
    /// Stamps a document at the current time. A blank title becomes the
    /// `無題` placeholder; the caller is responsible for rejecting blank
    /// content before saving.
    pub fn new(title: &str, content: &str) -> Self {
        let title = title.trim();
        Self {
            title: if title.is_empty() { UNTITLED.to_string() } else { title.to_string() },
            content: content.to_string(),
            timestamp: Utc::now(),
            doc_type: DOC_TYPE_GENERAL.to_string(),
        }
    }
}

/// Global application configuration (gateway + identity). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown in the UI header and health endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Base directory for the sled output store (desktop surface).
    pub storage_path: String,
    /// If true, the gateway serves the static web UI from `assets/`.
    /// (Config alias: `ui_enabled`)
    #[serde(default = "default_true", alias = "ui_enabled")]
    pub frontend_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env
    /// `SHIKIBU_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("SHIKIBU_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Shikibu")?
            .set_default("port", 8001_i64)?
            .set_default("storage_path", "./data")?
            .set_default("frontend_enabled", true)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("SHIKIBU").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_becomes_placeholder() {
        let doc = SavedDocument::new("  ", "本文");
        assert_eq!(doc.title, UNTITLED);
        assert_eq!(doc.content, "本文");
        assert_eq!(doc.doc_type, DOC_TYPE_GENERAL);
    }

    #[test]
    fn title_is_kept_when_present() {
        let doc = SavedDocument::new("T", "Hello");
        assert_eq!(doc.title, "T");
    }

    #[test]
    fn document_serializes_with_type_tag() {
        let doc = SavedDocument::new("T", "Hello");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "general");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = Message::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        let msg = Message::assistant("yo");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
