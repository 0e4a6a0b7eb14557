use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prowl_mock::{DEFAULT_BIND_ADDR, MockStore, options_from_lookup, serve};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prowl_mock=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Prowl mock API...");

    let options = options_from_lookup(|key| std::env::var(key).ok())?;
    if options.unhealthy_probes > 0 {
        tracing::info!(
            "Reporting unhealthy for the first {} probe(s)",
            options.unhealthy_probes
        );
    }

    let addr = std::env::var("MOCK_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);

    serve(listener, Arc::new(MockStore::new(options))).await
}
