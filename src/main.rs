mod app;
mod config;
mod filter;
mod inventory;
mod records;

use anyhow::Result;
use clap::Parser;

use app::{Cli, resolve_settings, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = resolve_settings(&cli)?;
    run(&cli, &settings)
}
