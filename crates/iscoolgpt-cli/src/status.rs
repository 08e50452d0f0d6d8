//! `iscoolgpt status` — show settings and provider status.
//!
//! Keys are never printed, only whether one is set and which variables are read.

use anyhow::Result;
use colored::Colorize;

use iscoolgpt_core::config::Settings;
use iscoolgpt_providers::ProviderKind;

use crate::helpers::key_status;

/// Run the status command.
pub fn run() -> Result<()> {
    let settings = Settings::from_env();

    println!();
    println!("{}", format!("🤖 {} Status", settings.app_name).cyan().bold());
    println!();

    println!("  {:<18} {}", "Listen:".bold(), settings.bind_address());
    println!(
        "  {:<18} {}s",
        "Request timeout:".bold(),
        settings.request_timeout.as_secs()
    );

    println!();
    println!("  {}", "Providers:".bold());

    for kind in ProviderKind::ALL {
        let provider = kind.settings(&settings);
        println!(
            "    {:<10} {:<10} {:<22} {}",
            kind.display_name(),
            kind.route(),
            provider.model,
            key_status(provider.is_configured())
        );
        println!(
            "    {:<10} {}",
            "",
            format!("base: {}  keys: {}", provider.api_base, kind.key_env_vars().join(", ")).dimmed()
        );
    }

    println!();

    Ok(())
}
