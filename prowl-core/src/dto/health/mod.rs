//! Health DTOs

use serde::{Deserialize, Serialize};

/// One entry of the `GET /health` response
///
/// The service answers with a (usually empty) list of health warnings;
/// readiness only depends on the status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub source: String,
    #[serde(rename = "type")]
    pub check_type: String,
    pub message: String,
}
