//! Core types for IsCoolGPT.
//!
//! - HTTP bodies exchanged with browser/API callers (`ChatRequest`, `ChatResponse`, ...)
//! - Prompt validation shared by every entry point
//! - Provider wire formats (OpenAI chat completions, Gemini `generateContent`)

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─────────────────────────────────────────────
// Prompt validation
// ─────────────────────────────────────────────

/// Minimum prompt length, in characters.
pub const MIN_PROMPT_CHARS: usize = 1;
/// Maximum prompt length, in characters.
pub const MAX_PROMPT_CHARS: usize = 4000;
/// Prompt used by the GET chat endpoints when no `message` is given.
pub const DEFAULT_GET_PROMPT: &str = "ping";

/// A prompt that failed the length constraints.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("message must contain at least 1 character")]
    TooShort,
    #[error("message must contain at most 4000 characters (got {0})")]
    TooLong(usize),
}

/// Check a prompt against the 1–4000 character bounds.
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn validate_prompt(prompt: &str) -> Result<(), PromptError> {
    let len = prompt.chars().count();
    if len < MIN_PROMPT_CHARS {
        return Err(PromptError::TooShort);
    }
    if len > MAX_PROMPT_CHARS {
        return Err(PromptError::TooLong(len));
    }
    Ok(())
}

// ─────────────────────────────────────────────
// HTTP API bodies
// ─────────────────────────────────────────────

/// `POST /chat` and `POST /chatgpt` body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// User prompt.
    pub message: String,
}

/// Successful chat reply.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// Model-generated reply (trimmed, never empty).
    pub reply: String,
}

/// Error body returned for every non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub detail: String,
}

/// `GET /ping` body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PingResponse {
    pub message: String,
}

impl PingResponse {
    pub fn pong() -> Self {
        Self {
            message: "pong".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// OpenAI chat completions wire format
// ─────────────────────────────────────────────

/// A single message in an OpenAI chat completion request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST {api_base}/chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Raw chat completion response. Only the fields we read are modelled.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

/// Token usage statistics. Compatible servers often send only some of the counts.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Gemini generateContent wire format
// ─────────────────────────────────────────────

/// Request body for `POST {api_base}/models/{model}:generateContent`.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one user text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(text.into()),
                }],
            }],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Non-text parts (inline data, function calls) deserialize with `text: None`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    ///
    /// Returns an empty string when there is no candidate or no text part.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prompt_bounds() {
        assert_eq!(validate_prompt(""), Err(PromptError::TooShort));
        assert!(validate_prompt("a").is_ok());
        assert!(validate_prompt(&"a".repeat(4000)).is_ok());
        assert_eq!(
            validate_prompt(&"a".repeat(4001)),
            Err(PromptError::TooLong(4001))
        );
    }

    #[test]
    fn test_validate_prompt_counts_chars_not_bytes() {
        // 4000 two-byte characters is still within bounds
        assert!(validate_prompt(&"é".repeat(4000)).is_ok());
    }

    #[test]
    fn test_chat_completion_request_shape() {
        let req = ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user("hello")],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn test_chat_completion_response_null_content() {
        let resp: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "stop"}]
        }))
        .unwrap();
        assert!(resp.choices[0].message.content.is_none());
        assert!(resp.usage.is_none());
    }

    #[test]
    fn test_chat_completion_response_partial_usage() {
        let resp: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "Hello!"}}],
            "usage": {"total_tokens": 7}
        }))
        .unwrap();
        let usage = resp.usage.unwrap();
        assert_eq!(usage.total_tokens, 7);
        assert_eq!(usage.prompt_tokens, 0);
    }

    #[test]
    fn test_generate_content_request_shape() {
        let json = serde_json::to_value(GenerateContentRequest::user_text("hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"role": "user", "parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn test_generate_content_text_joins_parts() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]},
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-2.5-flash"
        }))
        .unwrap();
        assert_eq!(resp.text(), "Hello, world");
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_generate_content_text_empty_when_blocked() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert_eq!(resp.text(), "");
    }

    #[test]
    fn test_ping_body() {
        let json = serde_json::to_value(PingResponse::pong()).unwrap();
        assert_eq!(json, serde_json::json!({"message": "pong"}));
    }
}
