//! Tag API Handlers

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use prowl_core::dto::tag::{CreateTag, Tag};
use std::sync::Arc;

use crate::api::authorize;
use crate::api::error::{ApiError, ApiResult};
use crate::store::MockStore;

/// POST /tag
/// Create a tag and return it with its id
pub async fn create_tag(
    State(store): State<Arc<MockStore>>,
    headers: HeaderMap,
    Json(req): Json<CreateTag>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    authorize(&store, &headers)?;
    store.record("POST", "/tag", serde_json::to_value(&req).ok());

    if store.options().fail_tag {
        return Err(ApiError::BadRequest("Tag creation disabled".to_string()));
    }
    if req.label.trim().is_empty() {
        return Err(ApiError::validation("Label", "'Label' must not be empty."));
    }

    tracing::info!("Creating tag: {}", req.label);
    Ok((StatusCode::CREATED, Json(store.add_tag(&req.label))))
}
