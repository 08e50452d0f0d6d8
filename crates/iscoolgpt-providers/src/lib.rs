//! LLM provider layer for IsCoolGPT.
//!
//! # Architecture
//!
//! - [`traits::ChatBackend`] — capability every provider implements: prompt in, text out
//! - [`gemini::GeminiBackend`] / [`openai::OpenAiBackend`] — direct `reqwest` clients
//! - [`cache::ClientCache`] — builds one backend per API key and reuses it
//! - [`reply::ReplyGenerator`] — the shared call path: key check, single call, trim, classify
//! - [`registry::ProviderKind`] — the two supported providers and their wiring

pub mod cache;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod registry;
pub mod reply;
pub mod traits;

// Re-export main types for convenience
pub use cache::ClientCache;
pub use error::{BackendError, ErrorKind, ProviderError};
pub use gemini::{GeminiBackend, GeminiFactory};
pub use openai::{OpenAiBackend, OpenAiFactory};
pub use registry::{find_by_name, ProviderKind};
pub use reply::ReplyGenerator;
pub use traits::{ChatBackend, ClientFactory};
