//! Stub target API
//!
//! A small in-memory stand-in for the indexer manager's HTTP API, used to
//! exercise the setup run end to end without the real service.

pub mod api;
pub mod store;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use api::{API_PREFIX, create_router};
pub use store::{MockOptions, MockStore, RecordedCall};

/// Default listen address, matching the real service's port
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9696";

/// Build options from `MOCK_*` variables resolved through `lookup`
pub fn options_from_lookup<F>(lookup: F) -> Result<MockOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let mut options = MockOptions::new(get("MOCK_API_KEY").unwrap_or_else(|| "mock".to_string()));

    if let Some(raw) = get("MOCK_UNHEALTHY_PROBES") {
        options.unhealthy_probes = raw
            .trim()
            .parse()
            .with_context(|| format!("MOCK_UNHEALTHY_PROBES must be a number, got '{}'", raw))?;
    }
    if let Some(raw) = get("MOCK_FAIL_INDEXERS") {
        options.fail_indexers = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<HashSet<_>>();
    }
    options.fail_tag = get("MOCK_FAIL_TAG").is_some_and(|v| is_truthy(&v));
    options.fail_proxy = get("MOCK_FAIL_PROXY").is_some_and(|v| is_truthy(&v));

    Ok(options)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Serve the stub API on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, store: Arc<MockStore>) -> Result<()> {
    axum::serve(listener, create_router(store))
        .await
        .context("Mock server stopped")
}

/// Bind `addr` and serve in a background task
///
/// # Returns
/// The address actually bound (useful with port 0) and the shared store.
pub async fn spawn(addr: &str, options: MockOptions) -> Result<(SocketAddr, Arc<MockStore>)> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local = listener.local_addr()?;
    let store = Arc::new(MockStore::new(options));

    let served = Arc::clone(&store);
    tokio::spawn(async move {
        if let Err(e) = serve(listener, served).await {
            tracing::error!("{:#}", e);
        }
    });

    Ok((local, store))
}
