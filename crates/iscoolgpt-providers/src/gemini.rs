//! Google Gemini backend.
//!
//! Calls `POST {api_base}/models/{model}:generateContent` with the key in the
//! `x-goog-api-key` header. The reply text is the concatenation of the first
//! candidate's text parts; a blocked prompt or a candidate without text
//! parts yields an empty string.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use tracing::debug;

use iscoolgpt_core::types::{GenerateContentRequest, GenerateContentResponse};

use crate::error::BackendError;
use crate::traits::{ChatBackend, ClientFactory};

const DISPLAY_NAME: &str = "Gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// An authenticated Gemini client.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_base: String,
    api_key: HeaderValue,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiBackend {
    pub fn new(api_key: &str, api_base: &str, timeout: Duration) -> Result<Self, BackendError> {
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|e| BackendError::InvalidApiKey(e.to_string()))?;
        api_key.set_sensitive(true);

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.to_string(),
            api_key,
        })
    }

    /// `generateContent` URL for `model`. Accepts both `gemini-x` and `models/gemini-x`.
    fn generate_url(&self, model: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", base, model)
    }
}

#[async_trait]
impl ChatBackend for GeminiBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        debug!(provider = DISPLAY_NAME, model, "Calling generateContent");

        let response = self
            .client
            .post(self.generate_url(model))
            .header(API_KEY_HEADER, self.api_key.clone())
            .json(&GenerateContentRequest::user_text(prompt))
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
        let generated: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))?;

        debug!(
            provider = DISPLAY_NAME,
            candidates = generated.candidates.len(),
            finish_reason = generated
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("?"),
            model_version = generated.model_version.as_deref().unwrap_or("?"),
            "Content generated"
        );

        Ok(generated.text())
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }
}

/// Builds [`GeminiBackend`]s against a fixed API base and timeout.
#[derive(Clone, Debug)]
pub struct GeminiFactory {
    api_base: String,
    timeout: Duration,
}

impl GeminiFactory {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            timeout,
        }
    }
}

impl ClientFactory for GeminiFactory {
    fn build(&self, api_key: &str) -> Result<Arc<dyn ChatBackend>, BackendError> {
        debug!(provider = DISPLAY_NAME, api_base = %self.api_base, "Creating client");
        Ok(Arc::new(GeminiBackend::new(api_key, &self.api_base, self.timeout)?))
    }
}
