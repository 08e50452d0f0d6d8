//! Provider registry — the two supported LLM providers and how to wire them.

use std::sync::Arc;

use iscoolgpt_core::config::{ProviderSettings, Settings};

use crate::gemini::GeminiFactory;
use crate::openai::OpenAiFactory;
use crate::traits::ClientFactory;

/// A supported provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Google Gemini, served on `/chat`.
    Gemini,
    /// OpenAI Chat Completions, served on `/chatgpt`.
    OpenAi,
}

impl ProviderKind {
    /// All providers, in display order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::OpenAi];

    /// Internal name (CLI argument).
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Human-readable name used in logs and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenAi => "OpenAI",
        }
    }

    /// Environment variables that can carry the API key, in priority order.
    pub fn key_env_vars(self) -> &'static [&'static str] {
        match self {
            ProviderKind::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            ProviderKind::OpenAi => &["OPENAI_API_KEY"],
        }
    }

    /// HTTP route serving this provider.
    pub fn route(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "/chat",
            ProviderKind::OpenAi => "/chatgpt",
        }
    }

    /// This provider's section of the settings.
    pub fn settings(self, settings: &Settings) -> &ProviderSettings {
        match self {
            ProviderKind::Gemini => &settings.gemini,
            ProviderKind::OpenAi => &settings.openai,
        }
    }

    /// Client factory bound to this provider's API base and the request timeout.
    pub fn factory(self, settings: &Settings) -> Arc<dyn ClientFactory> {
        let api_base = self.settings(settings).api_base.clone();
        match self {
            ProviderKind::Gemini => Arc::new(GeminiFactory::new(api_base, settings.request_timeout)),
            ProviderKind::OpenAi => Arc::new(OpenAiFactory::new(api_base, settings.request_timeout)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Find a provider by internal name (case-insensitive). `chatgpt` is accepted for OpenAI.
pub fn find_by_name(name: &str) -> Option<ProviderKind> {
    match name.to_lowercase().as_str() {
        "gemini" => Some(ProviderKind::Gemini),
        "openai" | "chatgpt" => Some(ProviderKind::OpenAi),
        _ => None,
    }
}
