//! IsCoolGPT CLI — entry point.
//!
//! # Commands
//!
//! - `iscoolgpt serve [--host HOST] [--port PORT]` — run the HTTP API + chat UI
//! - `iscoolgpt ask [-p gemini|openai] MESSAGE` — one reply from the terminal
//! - `iscoolgpt status` — show settings and provider key status

mod ask;
mod helpers;
mod server;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

use iscoolgpt_core::config::Settings;
use iscoolgpt_providers::{find_by_name, ProviderKind};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// IsCoolGPT — chat with Gemini and OpenAI over HTTP
#[derive(Parser)]
#[command(name = "iscoolgpt", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Listen address (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Send a single message and print the reply
    Ask {
        /// Message to send
        message: String,

        /// Provider to use
        #[arg(short, long, default_value = "gemini", value_parser = parse_provider)]
        provider: ProviderKind,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show settings and provider status
    Status,
}

fn parse_provider(name: &str) -> Result<ProviderKind, String> {
    find_by_name(name).ok_or_else(|| format!("unknown provider '{name}' (expected gemini or openai)"))
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs, "info");
            let mut settings = Settings::from_env();
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            server::run(settings).await
        }
        Commands::Ask {
            message,
            provider,
            logs,
        } => {
            init_logging(logs, "warn");
            ask::run(provider, &message).await
        }
        Commands::Status => status::run(),
    }
}

/// Initialize tracing/logging. `RUST_LOG` wins over both defaults.
fn init_logging(verbose: bool, default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("iscoolgpt=debug,iscoolgpt_core=debug,iscoolgpt_providers=debug,tower_http=debug,info")
        } else {
            EnvFilter::new(default_level)
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
