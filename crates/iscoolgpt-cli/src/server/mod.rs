//! HTTP server — routes, shared state, and the serve loop.
//!
//! Routes:
//! - `GET /ping` — liveness probe
//! - `GET|POST /chat` — Gemini
//! - `GET|POST /chatgpt` — OpenAI
//! - `GET /`, `GET /main` — chat UI

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use iscoolgpt_core::config::Settings;
use iscoolgpt_providers::{ProviderKind, ReplyGenerator};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    gemini: Arc<ReplyGenerator>,
    openai: Arc<ReplyGenerator>,
}

impl AppState {
    /// Wire the real provider backends from `settings`.
    pub fn new(settings: Settings) -> Self {
        let gemini = ReplyGenerator::for_provider(ProviderKind::Gemini, &settings);
        let openai = ReplyGenerator::for_provider(ProviderKind::OpenAi, &settings);
        Self::with_generators(settings, gemini, openai)
    }

    /// Build state around explicit generators.
    pub fn with_generators(
        settings: Settings,
        gemini: ReplyGenerator,
        openai: ReplyGenerator,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            gemini: Arc::new(gemini),
            openai: Arc::new(openai),
        }
    }

    pub fn generator(&self, kind: ProviderKind) -> &ReplyGenerator {
        match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAi => &self.openai,
        }
    }
}

/// Build the axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            ProviderKind::Gemini.route(),
            get(handlers::get_chat).post(handlers::post_chat),
        )
        .route(
            ProviderKind::OpenAi.route(),
            get(handlers::get_chatgpt).post(handlers::post_chatgpt),
        )
        .route("/", get(handlers::chat_page))
        .route("/main", get(handlers::chat_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn run(settings: Settings) -> Result<()> {
    let addr = settings.bind_address();

    for kind in ProviderKind::ALL {
        let provider = kind.settings(&settings);
        if provider.is_configured() {
            info!(provider = kind.display_name(), model = %provider.model, route = kind.route(), "Provider ready");
        } else {
            warn!(
                provider = kind.display_name(),
                route = kind.route(),
                "API key not configured; requests will fail with 500"
            );
        }
    }

    let app_name = settings.app_name.clone();
    let app = router(AppState::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(app = %app_name, address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use iscoolgpt_core::config::ProviderSettings;
    use iscoolgpt_providers::{BackendError, ChatBackend, ClientFactory};
    use tower::ServiceExt;

    #[derive(Clone, Copy)]
    enum Stub {
        Reply(&'static str),
        Fail,
    }

    struct StubBackend {
        stub: Stub,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn generate(&self, _model: &str, prompt: &str) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.stub {
                Stub::Reply(text) if text == "echo" => Ok(format!("echo: {prompt}")),
                Stub::Reply(text) => Ok(text.to_string()),
                Stub::Fail => Err(BackendError::Decode(
                    "connection reset by peer (raw-provider-text)".into(),
                )),
            }
        }

        fn display_name(&self) -> &str {
            "Stub"
        }
    }

    struct StubFactory {
        stub: Stub,
        calls: Arc<AtomicUsize>,
    }

    impl ClientFactory for StubFactory {
        fn build(&self, _api_key: &str) -> Result<Arc<dyn ChatBackend>, BackendError> {
            Ok(Arc::new(StubBackend {
                stub: self.stub,
                calls: self.calls.clone(),
            }))
        }
    }

    struct Harness {
        app: Router,
        gemini_calls: Arc<AtomicUsize>,
        openai_calls: Arc<AtomicUsize>,
    }

    fn harness(gemini: Stub, openai: Stub, configured: bool) -> Harness {
        let gemini_calls = Arc::new(AtomicUsize::new(0));
        let openai_calls = Arc::new(AtomicUsize::new(0));

        let mut settings = Settings::default();
        if configured {
            settings.gemini = ProviderSettings::new("gemini-test", "http://unused").with_api_key("g-key");
            settings.openai = ProviderSettings::new("gpt-test", "http://unused").with_api_key("o-key");
        }

        let timeout = Duration::from_secs(5);
        let gemini_gen = ReplyGenerator::new(
            "Gemini",
            Arc::new(StubFactory {
                stub: gemini,
                calls: gemini_calls.clone(),
            }),
            timeout,
        );
        let openai_gen = ReplyGenerator::new(
            "OpenAI",
            Arc::new(StubFactory {
                stub: openai,
                calls: openai_calls.clone(),
            }),
            timeout,
        );

        Harness {
            app: router(AppState::with_generators(settings, gemini_gen, openai_gen)),
            gemini_calls,
            openai_calls,
        }
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let h = harness(Stub::Reply("x"), Stub::Reply("x"), false);
        let resp = h.app.oneshot(get("/ping")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!({"message": "pong"}));
    }

    #[tokio::test]
    async fn test_post_chat_trims_reply() {
        let h = harness(Stub::Reply("  Hi there!  "), Stub::Reply("unused"), true);
        let resp = h
            .app
            .oneshot(post_json("/chat", r#"{"message":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!({"reply": "Hi there!"}));
        assert_eq!(h.gemini_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.openai_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_chat_missing_key_is_500() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("unused"), false);
        let resp = h.app.oneshot(get("/chat")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("not configured"));
        assert_eq!(h.gemini_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_chat_defaults_to_ping() {
        let h = harness(Stub::Reply("echo"), Stub::Reply("unused"), true);
        let resp = h.app.oneshot(get("/chat")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["reply"], "echo: ping");
    }

    #[tokio::test]
    async fn test_get_chatgpt_with_query() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("echo"), true);
        let resp = h
            .app
            .oneshot(get("/chatgpt?message=hello%20there"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["reply"], "echo: hello there");
        assert_eq!(h.openai_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.gemini_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_post_chatgpt_empty_message_is_422() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("unused"), true);
        let resp = h
            .app
            .oneshot(post_json("/chatgpt", r#"{"message":""}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json_body(resp).await["detail"].is_string());
        assert_eq!(h.openai_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_post_missing_field_is_422() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("unused"), true);
        let resp = h.app.oneshot(post_json("/chat", r#"{}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_post_malformed_json_is_422() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("unused"), true);
        let resp = h.app.oneshot(post_json("/chat", "{not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_too_long_message_is_422() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("unused"), true);
        let body = serde_json::json!({"message": "a".repeat(4001)}).to_string();
        let resp = h.app.oneshot(post_json("/chat", &body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_empty_query_message_is_422() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("unused"), true);
        let resp = h.app.oneshot(get("/chat?message=")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_transport_failure_is_502() {
        let h = harness(Stub::Fail, Stub::Reply("unused"), true);
        let resp = h
            .app
            .oneshot(post_json("/chat", r#"{"message":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let detail = json_body(resp).await["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("request failed"));
        assert!(!detail.contains("raw-provider-text"));
    }

    #[tokio::test]
    async fn test_blank_reply_is_502() {
        let h = harness(Stub::Reply("unused"), Stub::Reply("  \n "), true);
        let resp = h
            .app
            .oneshot(post_json("/chatgpt", r#"{"message":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let detail = json_body(resp).await["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("empty response"));
    }

    #[tokio::test]
    async fn test_chat_page_served_on_root_and_main() {
        for uri in ["/", "/main"] {
            let h = harness(Stub::Reply("unused"), Stub::Reply("unused"), false);
            let resp = h.app.oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
            assert!(content_type.starts_with("text/html"));
            let bytes = resp.into_body().collect().await.unwrap().to_bytes();
            let html = String::from_utf8(bytes.to_vec()).unwrap();
            assert!(html.contains("<html"));
            assert!(html.contains("<title>IsCoolGPT API</title>"));
            assert!(!html.contains("{{app_name}}"));
        }
    }
}
