//! Reply generation — the single call path shared by every provider.
//!
//! 1. No API key → [`ProviderError::MissingApiKey`], nothing is sent.
//! 2. Fetch the client from the [`ClientCache`].
//! 3. One `generate` call, bounded by the request timeout.
//! 4. Transport failure → [`ProviderError::Upstream`] (cause logged and kept as source).
//! 5. Trim; empty → [`ProviderError::EmptyResponse`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use iscoolgpt_core::config::{ProviderSettings, Settings};

use crate::cache::ClientCache;
use crate::error::{BackendError, ProviderError};
use crate::registry::ProviderKind;
use crate::traits::ClientFactory;

/// Generates replies from one provider.
pub struct ReplyGenerator {
    provider: &'static str,
    cache: ClientCache,
    timeout: Duration,
}

impl ReplyGenerator {
    /// Create a generator around an arbitrary client factory.
    pub fn new(provider: &'static str, factory: Arc<dyn ClientFactory>, timeout: Duration) -> Self {
        Self {
            provider,
            cache: ClientCache::new(factory),
            timeout,
        }
    }

    /// Create the generator for a built-in provider.
    pub fn for_provider(kind: ProviderKind, settings: &Settings) -> Self {
        Self::new(
            kind.display_name(),
            kind.factory(settings),
            settings.request_timeout,
        )
    }

    /// Display name of the provider this generator calls.
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// The underlying client cache.
    pub fn cache(&self) -> &ClientCache {
        &self.cache
    }

    /// Send `prompt` to the provider and return the trimmed, non-empty reply.
    pub async fn generate(
        &self,
        settings: &ProviderSettings,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let provider = self.provider;
        let message_len = prompt.chars().count();

        let api_key = settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingApiKey { provider })?;

        let client = self.cache.get_client(api_key).await.map_err(|source| {
            error!(provider, model = %settings.model, error = %source, "Client initialization failed");
            ProviderError::ClientInit { provider, source }
        })?;

        let backend = client.display_name();
        debug!(provider, backend, model = %settings.model, message_len, "Requesting reply");

        let result = tokio::time::timeout(self.timeout, client.generate(&settings.model, prompt))
            .await
            .unwrap_or_else(|_| Err(BackendError::Timeout(self.timeout)));

        let text = result.map_err(|source| {
            error!(provider, backend, message_len, error = %source, "Provider request failed");
            ProviderError::Upstream { provider, source }
        })?;

        let reply = text.trim();
        if reply.is_empty() {
            error!(provider, backend, message_len, "Provider returned empty text");
            return Err(ProviderError::EmptyResponse { provider });
        }

        Ok(reply.to_string())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
