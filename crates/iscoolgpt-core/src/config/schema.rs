//! Configuration schema — the immutable settings value shared by every request.
//!
//! Hierarchy: `Settings` → one `ProviderSettings` per provider (Gemini, OpenAI)
//! plus process-wide listen address and request timeout.

use std::time::Duration;

// ─────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────

pub const DEFAULT_APP_NAME: &str = "IsCoolGPT API";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default model compatible with the Gemini v1beta `generateContent` API.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

// ─────────────────────────────────────────────
// Root Settings
// ─────────────────────────────────────────────

/// Runtime settings, constructed once at startup and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Human-readable service name (startup log, HTML title).
    pub app_name: String,
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Upper bound on a single provider call.
    pub request_timeout: Duration,
    /// Google Gemini (served on `/chat`).
    pub gemini: ProviderSettings,
    /// OpenAI Chat Completions (served on `/chatgpt`).
    pub openai: ProviderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            gemini: ProviderSettings::new(DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_API_BASE),
            openai: ProviderSettings::new(DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_API_BASE),
        }
    }
}

impl Settings {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Settings for a single LLM provider.
///
/// A missing `api_key` is legal here; it only becomes an error when a
/// reply is requested from that provider.
#[derive(Clone, PartialEq)]
pub struct ProviderSettings {
    /// API key for authentication.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// REST base URL (no trailing path segment for the operation).
    pub api_base: String,
}

impl ProviderSettings {
    pub fn new(model: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: None,
            model: model.into(),
            api_base: api_base.into(),
        }
    }

    /// Builder-style setter for the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}
