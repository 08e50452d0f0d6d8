//! OpenAI Chat Completions backend.
//!
//! Talks directly to `POST {api_base}/chat/completions` with bearer auth and
//! a single user message. Any OpenAI-compatible endpoint works when
//! `OPENAI_API_BASE` points at it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::debug;

use iscoolgpt_core::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

use crate::error::BackendError;
use crate::traits::{ChatBackend, ClientFactory};

const DISPLAY_NAME: &str = "OpenAI";

// ─────────────────────────────────────────────
// OpenAiBackend
// ─────────────────────────────────────────────

/// An authenticated OpenAI client.
pub struct OpenAiBackend {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// Pre-built `Authorization: Bearer …` value.
    auth_header: HeaderValue,
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl OpenAiBackend {
    /// Create a client for `api_key`.
    ///
    /// Fails if the key cannot be sent as an HTTP header or the HTTP client
    /// cannot be built.
    pub fn new(api_key: &str, api_base: &str, timeout: Duration) -> Result<Self, BackendError> {
        let mut auth_header = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| BackendError::InvalidApiKey(e.to_string()))?;
        auth_header.set_sensitive(true);

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.to_string(),
            auth_header,
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let request_body = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
        };

        debug!(provider = DISPLAY_NAME, model, "Calling chat completions");

        let response = self
            .client
            .post(self.completions_url())
            .header(AUTHORIZATION, self.auth_header.clone())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))?;

        let ChatCompletionResponse { id, choices, usage } = completion;
        let choice = choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("no choices in response".to_string()))?;

        debug!(
            provider = DISPLAY_NAME,
            id = id.as_deref().unwrap_or("?"),
            finish_reason = choice.finish_reason.as_deref().unwrap_or("?"),
            total_tokens = usage.as_ref().map_or(0, |u| u.total_tokens),
            "Chat completion received"
        );

        Ok(choice.message.content.unwrap_or_default())
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }
}

// ─────────────────────────────────────────────
// Factory
// ─────────────────────────────────────────────

/// Builds [`OpenAiBackend`]s against a fixed API base and timeout.
#[derive(Clone, Debug)]
pub struct OpenAiFactory {
    api_base: String,
    timeout: Duration,
}

impl OpenAiFactory {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            timeout,
        }
    }
}

impl ClientFactory for OpenAiFactory {
    fn build(&self, api_key: &str) -> Result<Arc<dyn ChatBackend>, BackendError> {
        debug!(provider = DISPLAY_NAME, api_base = %self.api_base, "Creating client");
        Ok(Arc::new(OpenAiBackend::new(api_key, &self.api_base, self.timeout)?))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
