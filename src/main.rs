mod audit;
mod cli;
mod config;
mod error;
mod fields;
mod fingerprint;
mod github;
mod migrate;
mod model;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tracker_migrate=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli).await
}
