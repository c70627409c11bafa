use std::path::PathBuf;

use clap::Parser;

/// lazypane: lazygit in a terminal panel, one per repository.
#[derive(Parser, Debug)]
#[command(name = "lazypane", version, about)]
pub struct Args {
    /// Folders to open, one panel each.
    pub directories: Vec<PathBuf>,

    /// Don't reopen the panels left open last time.
    #[arg(long)]
    pub no_restore: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Turn a `--log-level` value into a filter directive.
///
/// A bare level applies to the lazypane crates; anything else is passed
/// through as-is.
pub fn log_directive(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        l @ ("trace" | "debug" | "info" | "warn" | "error") => format!("lazypane={l}"),
        _ => level.trim().to_string(),
    }
}
