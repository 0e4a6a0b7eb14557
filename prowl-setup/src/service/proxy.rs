//! Proxy registration stage

use prowl_core::domain::call::{ApiRequest, CallOutcome, CallSite, RunPolicy};
use prowl_core::domain::proxy::ProxyTemplate;
use std::collections::HashMap;
use tracing::info;

use crate::error::Result;
use crate::executor::CallExecutor;
use crate::inputs::InputError;

/// Render the proxy template and register it
///
/// Exactly one call is made, and its failure is fatal: indexers relying on
/// the captcha-solving proxy would be useless without it.
///
/// # Arguments
/// * `executor` - Call executor for the target API
/// * `template` - Proxy document with `${KEY}` placeholders
/// * `substitutions` - Values for the placeholders
pub async fn register_proxy(
    executor: &CallExecutor,
    template: &ProxyTemplate,
    substitutions: &HashMap<String, String>,
) -> Result<CallOutcome> {
    let proxy = template.render(substitutions).map_err(InputError::from)?;

    let outcome = executor
        .execute(
            RunPolicy::FATAL,
            ApiRequest::new(CallSite::RegisterProxy, Some(proxy.payload().clone())),
        )
        .await?;

    info!(
        "Registered indexer proxy '{}'",
        proxy.name().unwrap_or("<unnamed>")
    );

    Ok(outcome)
}
