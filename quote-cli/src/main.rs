use anyhow::Context;
use clap::Parser;
use tracing::debug;

use quote_cli::cli::Cli;
use quote_cli::config::AppConfig;
use quote_cli::{app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false);
    }

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    app::run(cli, &config).await
}
