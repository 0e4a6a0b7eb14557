//! Readiness prober
//!
//! Polls `GET /health` at a fixed interval until it answers 2xx.

use prowl_client::Transport;
use prowl_core::domain::call::{ApiRequest, CallSite};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("Service not ready after {attempts} probe(s) in {waited:?}")]
    Timeout { attempts: u32, waited: Duration },
}

/// How long it took for the service to come up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyReport {
    pub attempts: u32,
    pub waited: Duration,
}

/// Health poller for the target API
pub struct ReadinessProber {
    transport: Arc<dyn Transport>,
    poll_interval: Duration,
    max_wait: Option<Duration>,
}

impl ReadinessProber {
    /// Creates a new prober
    ///
    /// # Arguments
    /// * `transport` - Client carrying the API key
    /// * `poll_interval` - Delay between probes
    /// * `max_wait` - Give up after this long; `None` polls forever
    pub fn new(
        transport: Arc<dyn Transport>,
        poll_interval: Duration,
        max_wait: Option<Duration>,
    ) -> Self {
        Self {
            transport,
            poll_interval,
            max_wait,
        }
    }

    /// Issue a single health check
    ///
    /// Connection errors and non-2xx answers both mean "not ready".
    pub async fn probe_once(&self) -> bool {
        match self
            .transport
            .send(&ApiRequest::empty(CallSite::Health))
            .await
        {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                debug!("Health check returned {}", response.status);
                false
            }
            Err(e) => {
                debug!("Health check failed: {}", e);
                false
            }
        }
    }

    /// Block until the service reports healthy
    ///
    /// The first probe is sent immediately; each later one waits for the
    /// poll interval.
    pub async fn await_ready(&self) -> Result<ReadyReport, ReadinessError> {
        info!(
            "Waiting for target API to become ready (interval: {:?}, limit: {:?})",
            self.poll_interval, self.max_wait
        );

        let started = Instant::now();
        let mut interval = time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempts = 0u32;

        loop {
            interval.tick().await;
            attempts += 1;

            // A hanging probe must not outlast the overall limit
            let ready = match self.max_wait {
                Some(max_wait) => {
                    let remaining = max_wait.saturating_sub(started.elapsed());
                    time::timeout(remaining, self.probe_once())
                        .await
                        .unwrap_or(false)
                }
                None => self.probe_once().await,
            };

            if ready {
                let waited = started.elapsed();
                info!("Target API ready after {} probe(s)", attempts);
                return Ok(ReadyReport { attempts, waited });
            }

            let waited = started.elapsed();
            if self.max_wait.is_some_and(|max_wait| waited >= max_wait) {
                return Err(ReadinessError::Timeout { attempts, waited });
            }

            info!("Target API not ready yet, waiting...");
        }
    }
}
