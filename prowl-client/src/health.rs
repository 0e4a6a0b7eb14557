//! Health endpoint

use crate::error::{ClientError, Result};
use crate::{TargetClient, Transport};
use prowl_core::domain::call::{ApiRequest, CallSite};
use prowl_core::dto::health::HealthCheck;

impl TargetClient {
    /// Run a single health check
    ///
    /// # Returns
    /// The health warnings reported by the service (usually empty). A non-2xx
    /// answer is returned as [`ClientError::ApiError`].
    pub async fn check_health(&self) -> Result<Vec<HealthCheck>> {
        let response = self.send(&ApiRequest::empty(CallSite::Health)).await?;

        if !response.is_success() {
            return Err(ClientError::api_error(response.status, response.body));
        }

        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&response.body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse health response: {}", e)))
    }
}
