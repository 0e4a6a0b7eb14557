//! Indexer API Handlers

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::api::authorize;
use crate::api::error::{ApiError, ApiResult};
use crate::store::{IndexerRejection, MockStore};

/// POST /indexer
/// Create an indexer; names must be unique
pub async fn create_indexer(
    State(store): State<Arc<MockStore>>,
    headers: HeaderMap,
    Json(indexer): Json<JsonValue>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    authorize(&store, &headers)?;
    store.record("POST", "/indexer", Some(indexer.clone()));

    match store.add_indexer(indexer) {
        Ok(created) => {
            tracing::info!("Created indexer: {}", created["name"]);
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(IndexerRejection::MissingName) => {
            Err(ApiError::validation("Name", "'Name' must not be empty."))
        }
        Err(IndexerRejection::Duplicate(_)) => Err(ApiError::validation("Name", "Should be unique")),
        Err(IndexerRejection::Configured(name)) => Err(ApiError::validation(
            "",
            format!("Unable to connect to indexer {}", name),
        )),
    }
}

/// POST /indexer/action/checkCaptcha
/// Pretend the captcha challenge was solved
pub async fn check_captcha(
    State(store): State<Arc<MockStore>>,
    headers: HeaderMap,
    Json(indexer): Json<JsonValue>,
) -> ApiResult<Json<JsonValue>> {
    authorize(&store, &headers)?;
    store.record("POST", "/indexer/action/checkCaptcha", Some(indexer.clone()));

    tracing::info!(
        "Captcha check for: {}",
        indexer.get("name").and_then(JsonValue::as_str).unwrap_or("<unnamed>")
    );
    Ok(Json(serde_json::json!({})))
}
