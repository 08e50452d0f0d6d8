//! Route handlers.
//!
//! `/chat` is served by Gemini and `/chatgpt` by OpenAI. Both accept the
//! prompt as `?message=` on GET (default `"ping"`) or as `{"message": ...}`
//! on POST.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, warn};

use iscoolgpt_core::types::{
    validate_prompt, ChatRequest, ChatResponse, PingResponse, DEFAULT_GET_PROMPT,
};
use iscoolgpt_providers::ProviderKind;

use super::error::ApiError;
use super::AppState;

/// Query string of the GET chat endpoints.
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub message: Option<String>,
}

/// Liveness probe.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

const CHAT_PAGE: &str = include_str!("static/chat.html");

/// The chat UI, served on `/` and `/main`, titled with the app name.
pub async fn chat_page(State(state): State<AppState>) -> impl IntoResponse {
    let page = CHAT_PAGE.replace("{{app_name}}", &escape_html(&state.settings.app_name));
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        page,
    )
}

pub async fn get_chat(
    State(state): State<AppState>,
    query: Result<Query<ChatQuery>, QueryRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = query_prompt(query)?;
    reply(&state, ProviderKind::Gemini, &prompt).await
}

pub async fn post_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = body_prompt(body)?;
    reply(&state, ProviderKind::Gemini, &prompt).await
}

pub async fn get_chatgpt(
    State(state): State<AppState>,
    query: Result<Query<ChatQuery>, QueryRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = query_prompt(query)?;
    reply(&state, ProviderKind::OpenAi, &prompt).await
}

pub async fn post_chatgpt(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = body_prompt(body)?;
    reply(&state, ProviderKind::OpenAi, &prompt).await
}

// -- Helpers --

fn query_prompt(query: Result<Query<ChatQuery>, QueryRejection>) -> Result<String, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let prompt = query
        .message
        .unwrap_or_else(|| DEFAULT_GET_PROMPT.to_string());
    validate_prompt(&prompt).map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(prompt)
}

fn body_prompt(body: Result<Json<ChatRequest>, JsonRejection>) -> Result<String, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    validate_prompt(&request.message).map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(request.message)
}

async fn reply(
    state: &AppState,
    kind: ProviderKind,
    prompt: &str,
) -> Result<Json<ChatResponse>, ApiError> {
    debug!(provider = kind.display_name(), route = kind.route(), "Chat request");
    let reply = state
        .generator(kind)
        .generate(kind.settings(&state.settings), prompt)
        .await
        .inspect_err(|e| {
            warn!(provider = e.provider(), kind = ?e.kind(), route = kind.route(), "Chat request failed");
        })?;
    Ok(Json(ChatResponse { reply }))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
