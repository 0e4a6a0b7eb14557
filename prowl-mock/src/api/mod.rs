//! API Module
//!
//! HTTP surface of the stub target API, mounted under `/api/v1`.
//! Every endpoint requires the `X-Api-Key` header.

pub mod error;
pub mod health;
pub mod indexer;
pub mod proxy;
pub mod tag;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::error::{ApiError, ApiResult};
use crate::store::MockStore;

/// Prefix every route is nested under
pub const API_PREFIX: &str = "/api/v1";

const API_KEY_HEADER: &str = "x-api-key";

/// Create the main API router with all endpoints
pub fn create_router(store: Arc<MockStore>) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/tag", post(tag::create_tag))
        .route("/indexerProxy", post(proxy::create_proxy))
        .route("/indexer", post(indexer::create_indexer))
        .route(
            "/indexer/action/checkCaptcha",
            post(indexer::check_captcha),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

/// Reject requests without the configured key
pub(crate) fn authorize(store: &MockStore, headers: &HeaderMap) -> ApiResult<()> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if key == store.options().api_key => Ok(()),
        _ => {
            tracing::warn!("Rejected request with missing or wrong API key");
            Err(ApiError::Unauthorized)
        }
    }
}
