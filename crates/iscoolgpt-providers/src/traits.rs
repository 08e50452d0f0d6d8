//! Provider capability traits.
//!
//! Every backend (Gemini, OpenAI, test doubles) implements [`ChatBackend`];
//! the response-shape differences between providers stay behind it so the
//! reply path in [`crate::reply`] is written once.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;

/// An authenticated handle to one LLM provider.
///
/// Implementations must be safe for concurrent use; a single instance is
/// shared by every request that uses the same API key.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `prompt` as a single user message to `model` and return the raw
    /// generated text (untrimmed; may be empty).
    ///
    /// Any transport, status, or decoding failure is returned as a
    /// [`BackendError`] carrying the provider's own error text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

/// Builds a [`ChatBackend`] for a given API key.
///
/// Called at most once per key by [`crate::cache::ClientCache`].
pub trait ClientFactory: Send + Sync {
    fn build(&self, api_key: &str) -> Result<Arc<dyn ChatBackend>, BackendError>;
}
