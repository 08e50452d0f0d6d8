//! Error types for the provider layer.
//!
//! Two levels:
//! - [`BackendError`] — what a provider transport reported, including raw
//!   provider text. Only ever logged or kept as an error source.
//! - [`ProviderError`] — the classified failure handed to callers. Its
//!   `Display` is a fixed message per category and never includes the source.

use std::time::Duration;

use thiserror::Error;

/// A failure reported by a concrete backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid API key: {0}")]
    InvalidApiKey(String),
}

/// Failure category, used by the HTTP layer to pick a status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable credentials/settings. Not retried.
    Configuration,
    /// The provider call failed for any reason.
    UpstreamRequest,
    /// The provider answered with no usable text.
    EmptyResponse,
}

/// A classified reply-generation failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} API key not configured.")]
    MissingApiKey { provider: &'static str },

    #[error("Failed to initialize {provider} client. Check API key and model name.")]
    ClientInit {
        provider: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("{provider} API request failed.")]
    Upstream {
        provider: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("{provider} API returned an empty response.")]
    EmptyResponse { provider: &'static str },
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::MissingApiKey { .. } | ProviderError::ClientInit { .. } => {
                ErrorKind::Configuration
            }
            ProviderError::Upstream { .. } => ErrorKind::UpstreamRequest,
            ProviderError::EmptyResponse { .. } => ErrorKind::EmptyResponse,
        }
    }

    /// Display name of the provider that failed.
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::MissingApiKey { provider }
            | ProviderError::ClientInit { provider, .. }
            | ProviderError::Upstream { provider, .. }
            | ProviderError::EmptyResponse { provider } => provider,
        }
    }
}
