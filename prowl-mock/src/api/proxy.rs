//! Indexer Proxy API Handlers

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::api::authorize;
use crate::api::error::{ApiError, ApiResult};
use crate::store::MockStore;

/// POST /indexerProxy
/// Register a proxy document as-is
pub async fn create_proxy(
    State(store): State<Arc<MockStore>>,
    headers: HeaderMap,
    Json(proxy): Json<JsonValue>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    authorize(&store, &headers)?;
    store.record("POST", "/indexerProxy", Some(proxy.clone()));

    if store.options().fail_proxy {
        return Err(ApiError::validation("Host", "Unable to reach proxy host"));
    }
    if !proxy.is_object() {
        return Err(ApiError::BadRequest("Expected a proxy object".to_string()));
    }

    tracing::info!(
        "Registering indexer proxy: {}",
        proxy.get("name").and_then(JsonValue::as_str).unwrap_or("<unnamed>")
    );
    Ok((StatusCode::CREATED, Json(store.add_proxy(proxy))))
}
