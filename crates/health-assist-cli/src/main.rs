use clap::Parser;
use tracing_subscriber::EnvFilter;

mod browser;
mod cli;
mod commands;
mod output;

use browser::SystemBrowser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    commands::run(cli, &SystemBrowser)
}

/// Logs go to stderr so `--json` output stays clean.
fn init_tracing(level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// An explicit level wins over `RUST_LOG`; anything unparsable means `warn`.
fn log_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_log_level_is_used() {
        assert_eq!(
            log_filter(Some("health_assist_voice=debug")).to_string(),
            EnvFilter::new("health_assist_voice=debug").to_string()
        );
    }

    #[test]
    fn test_invalid_log_level_falls_back_to_warn() {
        assert_eq!(
            log_filter(Some("health_assist=loud")).to_string(),
            EnvFilter::new("warn").to_string()
        );
    }
}
