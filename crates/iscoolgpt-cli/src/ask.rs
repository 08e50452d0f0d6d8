//! `iscoolgpt ask` — one reply from the terminal, through the same call path
//! as the HTTP endpoints.

use anyhow::{bail, Result};
use tracing::info;

use iscoolgpt_core::config::Settings;
use iscoolgpt_core::types::validate_prompt;
use iscoolgpt_providers::{ProviderKind, ReplyGenerator};

use crate::helpers;

/// Run the ask command.
pub async fn run(provider: ProviderKind, message: &str) -> Result<()> {
    if let Err(e) = validate_prompt(message) {
        bail!("invalid message: {e}");
    }

    let settings = Settings::from_env();
    let generator = ReplyGenerator::for_provider(provider, &settings);

    info!(provider = provider.display_name(), "Processing single message");

    match generator.generate(provider.settings(&settings), message).await {
        Ok(reply) => {
            helpers::print_reply(provider, &reply);
            Ok(())
        }
        // Only the classified message; the cause is in the debug log
        Err(e) => bail!("{e}"),
    }
}
