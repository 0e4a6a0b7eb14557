//! HTTP call executor
//!
//! Single entry point for every state-changing call made during setup.
//! Classifies the answer, logs failures and applies the call site's
//! [`RunPolicy`].

use prowl_client::Transport;
use prowl_core::domain::call::{ApiRequest, CallOutcome, RunPolicy};
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::{Result, SetupError};

/// Issues one request at a time and applies the per-call failure policy
#[derive(Clone)]
pub struct CallExecutor {
    transport: Arc<dyn Transport>,
}

impl CallExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Execute a request
    ///
    /// Any 2xx answer is a `Success`. Anything else, including a transport
    /// error, is a `Failure` and is always logged with its status and body.
    ///
    /// # Arguments
    /// * `policy` - Whether a failure aborts the run
    /// * `request` - The request to send
    ///
    /// # Returns
    /// The outcome, or [`SetupError::FatalStage`] when the call failed and
    /// `policy` does not allow skipping it. No retries are attempted.
    pub async fn execute(&self, policy: RunPolicy, request: ApiRequest) -> Result<CallOutcome> {
        let outcome = match self.transport.send(&request).await {
            Ok(response) => CallOutcome::from_response(response),
            Err(e) => CallOutcome::transport_failure(e),
        };

        match &outcome {
            CallOutcome::Success { status, .. } => {
                debug!(site = %request.site, status, "{} {} succeeded", request.method, request.path);
            }
            CallOutcome::Failure { status, body } => {
                error!(
                    site = %request.site,
                    status = ?status,
                    fatal = policy.is_fatal(),
                    "{} {} failed: {}",
                    request.method,
                    request.path,
                    body
                );

                if policy.is_fatal() {
                    return Err(SetupError::FatalStage {
                        site: request.site,
                        status: *status,
                        body: body.clone(),
                    });
                }
            }
        }

        Ok(outcome)
    }
}
