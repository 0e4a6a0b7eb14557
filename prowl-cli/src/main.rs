//! Prowl CLI
//!
//! Command-line interface for bootstrapping and inspecting an
//! indexer-aggregation service.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::ConfigArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prowl")]
#[command(about = "Indexer service bootstrap CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Show progress logs from the setup run
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "prowl_setup=info,prowl_client=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    handle_command(cli.command, &cli.config).await
}
