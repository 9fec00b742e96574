//! `sky`: show the weather for a coordinate from the command line.
//!
//! Subcommands:
//! - `configure` prompts for the API key, endpoint and default location
//! - `show` fetches one forecast and renders it with the saved date and temperature modes
//! - `settings` lists the display settings or switches one of them

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
