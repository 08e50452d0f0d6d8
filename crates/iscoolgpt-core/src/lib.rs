//! Core building blocks for IsCoolGPT.
//!
//! - [`config`] — immutable [`Settings`](config::Settings) resolved from the environment
//! - [`types`] — HTTP request/response bodies, provider wire formats, prompt validation

pub mod config;
pub mod types;

pub use config::Settings;
