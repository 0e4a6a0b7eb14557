//! Prowl Setup entrypoint
//!
//! Container-friendly binary: reads its settings from `PROWL_*` environment
//! variables, runs the whole setup once and exits. A non-zero exit code means
//! a fatal stage failed; tolerated indexer failures still exit 0.

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prowl_setup::{Config, run_from_config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prowl_setup=info,prowl_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Prowl setup");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Loaded configuration: target_url={}, indexers_file={}",
        config.target_url,
        config.indexers_file.display()
    );

    let summary = match run_from_config(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Setup aborted: {}", e);
            return Err(e.into());
        }
    };

    for (succeeded, failed, name) in summary.report.tally() {
        if failed > 0 {
            warn!("  {}: {} ok, {} failed", name, succeeded, failed);
        } else {
            info!("  {}: {} ok", name, succeeded);
        }
    }

    info!("Setup complete");
    Ok(())
}
