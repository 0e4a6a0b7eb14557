//! Error types for the setup driver

use prowl_core::domain::call::CallSite;
use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::inputs::InputError;
use crate::readiness::ReadinessError;

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

/// Anything that stops a setup run
///
/// Tolerated per-indexer failures never show up here; they are recorded in
/// the provisioning report instead.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Readiness(#[from] ReadinessError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] prowl_client::ClientError),

    /// A call configured as fatal did not succeed
    #[error("{site} failed ({}): {body}", status_label(.status))]
    FatalStage {
        site: CallSite,
        status: Option<u16>,
        body: String,
    },
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no response".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_stage_message() {
        let err = SetupError::FatalStage {
            site: CallSite::CreateTag,
            status: Some(401),
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "create-tag failed (status 401): Unauthorized");

        let err = SetupError::FatalStage {
            site: CallSite::RegisterProxy,
            status: None,
            body: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "register-proxy failed (no response): connection refused"
        );
    }
}
