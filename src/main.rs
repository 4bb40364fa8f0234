//! digital-blasphemy-sync: keep a local folder in sync with the Digital
//! Blasphemy wallpaper catalog.
//!
//! Walks the catalog newest first, picks the variant of each wallpaper that
//! matches the requested layout and resolution, and downloads the ones not
//! already on disk. Wallpapers the API lists at a resolution it cannot
//! actually serve are skipped; every other failure ends the run.

#![warn(clippy::all)]

mod catalog;
mod cli;
mod config;
mod download;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .init();

    let config = config::Config::from_cli(cli)?;
    tracing::info!(
        width = config.width,
        height = config.height,
        layout = %config.layout,
        directory = %config.directory.display(),
        dry_run = config.dry_run,
        "Starting digital-blasphemy-sync"
    );

    download::paths::ensure_directory(&config.directory)?;

    let client = catalog::HttpCatalogClient::new(&config.client_config())?;

    download::run(&client, &config.sync_config()).await?;

    Ok(())
}
