//! Shared CLI output helpers.

use colored::Colorize;

use iscoolgpt_providers::ProviderKind;

/// Print a provider reply to stdout.
pub fn print_reply(provider: ProviderKind, reply: &str) {
    println!();
    println!("{}", format!("🤖 {}", provider.display_name()).cyan().bold());
    println!("{reply}");
    println!();
}

/// `"✓ (key set)"` or `"· not configured"`.
pub fn key_status(configured: bool) -> String {
    if configured {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    }
}
