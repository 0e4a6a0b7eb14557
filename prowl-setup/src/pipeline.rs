//! Setup pipeline
//!
//! Ties the stages together in their fixed order:
//! readiness wait → tag → proxy → indexers.

use prowl_client::{TargetClient, Transport};
use prowl_core::domain::proxy::{HOST_PLACEHOLDER, TAG_ID_PLACEHOLDER};
use prowl_core::domain::report::ProvisionReport;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::bootstrap::{CredentialStore, reset_state};
use crate::config::Config;
use crate::error::Result;
use crate::executor::CallExecutor;
use crate::inputs::SetupInputs;
use crate::readiness::{ReadinessProber, ReadyReport};
use crate::service::{IndexerProvisioner, create_tag, register_proxy};

/// What a completed run did
#[derive(Debug, Clone)]
pub struct SetupSummary {
    pub ready: ReadyReport,
    pub tag_id: Option<i64>,
    pub report: ProvisionReport,
}

/// A configured setup run against one target API
pub struct SetupRun {
    executor: CallExecutor,
    prober: ReadinessProber,
}

impl SetupRun {
    /// # Arguments
    /// * `transport` - Client for the target API, already carrying the key
    /// * `prober` - Readiness prober sharing the same transport
    pub fn new(transport: Arc<dyn Transport>, prober: ReadinessProber) -> Self {
        Self {
            executor: CallExecutor::new(transport),
            prober,
        }
    }

    /// Run every stage
    ///
    /// Stops at the first fatal failure (readiness timeout, tag creation,
    /// proxy registration). Indexer failures are only reported.
    pub async fn run(&self, inputs: &SetupInputs) -> Result<SetupSummary> {
        let ready = self.prober.await_ready().await?;

        let tag_id = create_tag(&self.executor, &inputs.tag_label).await?;

        let mut substitutions = HashMap::from([(
            HOST_PLACEHOLDER.to_string(),
            inputs.flaresolverr_host.clone(),
        )]);
        if let Some(id) = tag_id {
            substitutions.insert(TAG_ID_PLACEHOLDER.to_string(), id.to_string());
        }
        register_proxy(&self.executor, &inputs.proxy_template, &substitutions).await?;

        let report = IndexerProvisioner::new(&self.executor)
            .provision_all(&inputs.definitions)
            .await?;

        info!(
            "Setup complete: {} indexer(s) processed, {} with failures",
            report.indexers.len(),
            report.indexers_with_failures()
        );

        Ok(SetupSummary {
            ready,
            tag_id,
            report,
        })
    }
}

/// Full run from configuration: credential, state reset, inputs, stages
pub async fn run_from_config(config: &Config) -> Result<SetupSummary> {
    config.validate()?;

    let api_key = CredentialStore::new(&config.env_file, &config.api_key_var).ensure()?;

    if let Some(state_dir) = &config.state_dir {
        let removed = reset_state(state_dir)?;
        info!(
            "Reset {} persisted state file(s) in {}",
            removed.len(),
            state_dir.display()
        );
    }

    let inputs = SetupInputs::load(config)?;

    let client = TargetClient::with_timeout(&config.target_url, api_key, config.request_timeout)?;
    info!("Configuring target API at {}", client.base_url());

    let transport: Arc<dyn Transport> = Arc::new(client);
    let prober = ReadinessProber::new(
        Arc::clone(&transport),
        config.poll_interval,
        config.ready_timeout,
    );

    SetupRun::new(transport, prober).run(&inputs).await
}
