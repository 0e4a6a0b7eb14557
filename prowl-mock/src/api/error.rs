//! API Error Handling
//!
//! Error responses shaped like the real service's.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// One entry of a validation failure body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: String,
    pub error_message: String,
}

/// API error type
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    Validation(ValidationFailure),
    Unavailable(String),
}

impl ApiError {
    pub fn validation(property: &str, message: impl Into<String>) -> Self {
        ApiError::Validation(ValidationFailure {
            property_name: property.to_string(),
            error_message: message.into(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": msg })),
            )
                .into_response(),
            ApiError::Validation(failure) => {
                tracing::warn!(
                    "Validation failed on {}: {}",
                    failure.property_name,
                    failure.error_message
                );
                (StatusCode::BAD_REQUEST, Json(vec![failure])).into_response()
            }
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "message": msg })),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
