//! Settings loader — resolves [`Settings`] from environment variables.
//!
//! Resolution never fails: every field has a default, and a missing API key
//! is only reported when a provider is actually called.
//!
//! # Variables
//! - `PORT` → `port` (falls back to 8000 when absent or not a valid port)
//! - `HOST` → `host`
//! - `REQUEST_TIMEOUT_SECS` → `request_timeout`
//! - `GEMINI_API_KEY`, then `API_KEY` → `gemini.api_key` (first non-empty wins)
//! - `GEMINI_MODEL`, `GEMINI_API_BASE` → `gemini.model`, `gemini.api_base`
//! - `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_API_BASE` → `openai.*`

use std::time::Duration;
use tracing::{debug, warn};

use super::schema::{
    ProviderSettings, Settings, DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL,
    DEFAULT_OPENAI_API_BASE, DEFAULT_OPENAI_MODEL, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values are treated as unset.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Settings::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid PORT, falling back to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let request_timeout = get("REQUEST_TIMEOUT_SECS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let gemini = ProviderSettings {
            api_key: first_present(&get, &["GEMINI_API_KEY", "API_KEY"]),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
        };

        let openai = ProviderSettings {
            api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            api_base: get("OPENAI_API_BASE")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
        };

        let settings = Settings {
            app_name: defaults.app_name,
            host: get("HOST").unwrap_or(defaults.host),
            port,
            request_timeout: Duration::from_secs(request_timeout),
            gemini,
            openai,
        };

        debug!(
            port = settings.port,
            gemini_model = %settings.gemini.model,
            gemini_configured = settings.gemini.is_configured(),
            openai_model = %settings.openai.model,
            openai_configured = settings.openai.is_configured(),
            "Settings resolved"
        );

        settings
    }
}

/// Return the first variable in `names` that has a value.
fn first_present<G>(get: &G, names: &[&str]) -> Option<String>
where
    G: Fn(&str) -> Option<String>,
{
    names.iter().find_map(|name| get(*name))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
