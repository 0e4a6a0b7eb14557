//! Tag creation stage

use prowl_core::domain::call::{ApiRequest, CallSite, RunPolicy};
use prowl_core::dto::tag::Tag;
use serde_json::json;
use tracing::{info, warn};

use crate::error::Result;
use crate::executor::CallExecutor;

/// Create the tag the proxy gets attached to
///
/// Failure is fatal. On success, returns the id the service assigned when
/// the response body can be read as a tag.
pub async fn create_tag(executor: &CallExecutor, label: &str) -> Result<Option<i64>> {
    let body = json!({ "label": label });

    let outcome = executor
        .execute(
            RunPolicy::FATAL,
            ApiRequest::new(CallSite::CreateTag, Some(body)),
        )
        .await?;

    match serde_json::from_str::<Tag>(outcome.body()) {
        Ok(tag) => {
            info!("Created tag '{}' (id {})", tag.label, tag.id);
            Ok(Some(tag.id))
        }
        Err(e) => {
            warn!("Tag '{}' created but response has no id: {}", label, e);
            Ok(None)
        }
    }
}
