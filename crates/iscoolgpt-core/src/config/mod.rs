//! Configuration system — schema and environment resolution.
//!
//! # Usage
//! ```no_run
//! use iscoolgpt_core::config::Settings;
//!
//! let settings = Settings::from_env();
//! println!("Gemini model: {}", settings.gemini.model);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use schema::{ProviderSettings, Settings};
