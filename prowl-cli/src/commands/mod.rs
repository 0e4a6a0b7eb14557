//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod credential;
mod plan;
mod probe;
mod run;

use anyhow::Result;
use clap::Subcommand;

use crate::config::ConfigArgs;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full setup against the target API
    Run,
    /// Show the calls a run would make, without sending anything
    Plan {
        /// Print each indexer payload too
        #[arg(long)]
        payloads: bool,
    },
    /// Send a single health check
    Probe,
    /// Make sure an API key exists in the env file and print it
    Credential {
        /// Print only the key
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `args` - Global settings
pub async fn handle_command(command: Commands, args: &ConfigArgs) -> Result<()> {
    let config = args.to_config()?;

    match command {
        Commands::Run => run::handle_run(&config).await,
        Commands::Plan { payloads } => plan::handle_plan(&config, payloads),
        Commands::Probe => probe::handle_probe(&config).await,
        Commands::Credential { quiet } => credential::handle_credential(&config, quiet),
    }
}
