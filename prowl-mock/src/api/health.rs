//! Health Check API Handler

use axum::{Json, extract::State, http::HeaderMap};
use prowl_core::dto::health::HealthCheck;
use std::sync::Arc;

use crate::api::authorize;
use crate::api::error::{ApiError, ApiResult};
use crate::store::MockStore;

/// GET /health
/// Answers 503 for the configured number of probes, then an empty check list
pub async fn health_check(
    State(store): State<Arc<MockStore>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<HealthCheck>>> {
    authorize(&store, &headers)?;
    store.record("GET", "/health", None);

    if !store.probe_health() {
        tracing::debug!("Health probe {} while starting", store.health_probes());
        return Err(ApiError::Unavailable("Starting".to_string()));
    }

    Ok(Json(Vec::new()))
}
