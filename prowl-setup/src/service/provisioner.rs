//! Indexer provisioner
//!
//! Registers each indexer definition in input order. Captcha-marked
//! definitions go through `create`, `checkCaptcha`, `create`; all others get
//! a single `create`. Every call is tolerant: one indexer failing never stops
//! the others.

use prowl_core::domain::call::{ApiRequest, RunPolicy};
use prowl_core::domain::indexer::IndexerDefinition;
use prowl_core::domain::report::{CallRecord, IndexerReport, ProvisionReport};
use tracing::{info, warn};

use crate::error::Result;
use crate::executor::CallExecutor;

/// Drives the per-indexer workflow
pub struct IndexerProvisioner<'a> {
    executor: &'a CallExecutor,
}

impl<'a> IndexerProvisioner<'a> {
    pub fn new(executor: &'a CallExecutor) -> Self {
        Self { executor }
    }

    /// Provision every definition, in order
    ///
    /// # Returns
    /// A report with one entry per definition. Tolerated failures are
    /// recorded there; the `Err` case is only reachable if a call site were
    /// configured as fatal.
    pub async fn provision_all(&self, definitions: &[IndexerDefinition]) -> Result<ProvisionReport> {
        let mut report = ProvisionReport::start();

        for (position, definition) in definitions.iter().enumerate() {
            info!(
                "[{}/{}] Provisioning indexer '{}' ({})",
                position + 1,
                definitions.len(),
                definition.name(),
                definition.branch()
            );
            report.indexers.push(self.provision(definition).await?);
        }

        report.finish();
        Ok(report)
    }

    /// Run the call plan for a single definition
    ///
    /// The payload is the definition exactly as supplied, for every call.
    pub async fn provision(&self, definition: &IndexerDefinition) -> Result<IndexerReport> {
        let branch = definition.branch();
        if !definition.is_well_formed() {
            warn!(
                "Indexer definition {} is malformed; sending it as-is",
                definition.name()
            );
        }
        let mut report = IndexerReport::new(definition.name(), branch);

        for &site in branch.call_plan() {
            let request = ApiRequest::new(site, Some(definition.payload().clone()));
            let outcome = self.executor.execute(RunPolicy::TOLERANT, request).await?;
            report.calls.push(CallRecord::from_outcome(site, &outcome));
        }

        if report.failed() > 0 {
            warn!(
                "Indexer '{}': {} of {} call(s) failed",
                report.name,
                report.failed(),
                report.calls.len()
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use prowl_core::domain::call::CallSite;
    use prowl_core::domain::indexer::{IndexerBranch, parse_document};
    use std::sync::Arc;

    const SCENARIO: &str = r#"[
        {"name": "A", "fields": []},
        {"name": "B", "fields": [{"name": "cardigannCaptcha"}]}
    ]"#;

    async fn run(transport: Arc<ScriptedTransport>, document: &str) -> ProvisionReport {
        let executor = CallExecutor::new(transport);
        let definitions = parse_document(document).unwrap();
        IndexerProvisioner::new(&executor)
            .provision_all(&definitions)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_scenario_call_sequence() {
        let transport = Arc::new(ScriptedTransport::new());
        run(transport.clone(), SCENARIO).await;

        assert_eq!(
            transport.call_log(),
            vec!["create(A)", "create(B)", "checkCaptcha(B)", "create(B)"]
        );
    }

    #[tokio::test]
    async fn test_captcha_sequence_independent_of_outcomes() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(CallSite::CreateIndexer, 400, "validation failed")
                .respond(CallSite::CheckCaptcha, 500, "solver down"),
        );
        let report = run(transport.clone(), SCENARIO).await;

        assert_eq!(
            transport.call_log(),
            vec!["create(A)", "create(B)", "checkCaptcha(B)", "create(B)"]
        );
        assert_eq!(
            report.tally(),
            vec![(0, 1, "A".to_string()), (0, 3, "B".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failures_never_stop_iteration() {
        let document = r#"[
            {"name": "One", "fields": []},
            {"name": "Two", "fields": []},
            {"name": "Three", "fields": [{"name": "cardigannCaptcha"}]},
            {"name": "Four", "fields": []}
        ]"#;
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond_for(CallSite::CreateIndexer, "One", 400, "bad")
                .respond_for(CallSite::CheckCaptcha, "Three", 400, "bad")
                .unreachable(CallSite::CreateIndexer)
                .respond_for(CallSite::CreateIndexer, "Four", 201, "{}"),
        );
        let report = run(transport.clone(), document).await;

        assert_eq!(report.indexers.len(), 4);
        assert_eq!(transport.calls().len(), 6);
        assert_eq!(
            report.tally(),
            vec![
                (0, 1, "One".to_string()),
                (0, 1, "Two".to_string()),
                (0, 3, "Three".to_string()),
                (1, 0, "Four".to_string()),
            ]
        );
        assert_eq!(report.indexers_with_failures(), 3);
    }

    #[tokio::test]
    async fn test_payload_forwarded_verbatim() {
        let document = r#"[{"name":"B","implementation":"Cardigann","fields":[{"name":"cardigannCaptcha","value":""}],"priority":25}]"#;
        let transport = Arc::new(ScriptedTransport::new());
        let report = run(transport.clone(), document).await;

        assert_eq!(report.indexers[0].branch, IndexerBranch::Captcha);
        for call in transport.calls() {
            let body = serde_json::to_string(call.body.as_ref().unwrap()).unwrap();
            assert_eq!(body, document[1..document.len() - 1]);
        }
    }

    #[tokio::test]
    async fn test_rerun_is_reproducible() {
        let first = Arc::new(ScriptedTransport::new());
        run(first.clone(), SCENARIO).await;

        // Second pass against a service that already has everything
        let second = Arc::new(ScriptedTransport::new().respond(
            CallSite::CreateIndexer,
            400,
            "Should be unique",
        ));
        run(second.clone(), SCENARIO).await;

        assert_eq!(first.calls(), second.calls());
    }

    #[tokio::test]
    async fn test_empty_document() {
        let transport = Arc::new(ScriptedTransport::new());
        let report = run(transport.clone(), "[]").await;
        assert!(report.indexers.is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_fails_alone() {
        let document = r#"[
            {"name": "A", "fields": []},
            {"fields": []},
            {"name": "C", "fields": [{"name": "cardigannCaptcha"}]}
        ]"#;
        let transport = Arc::new(
            ScriptedTransport::new()
                .then(CallSite::CreateIndexer, 201, "{}")
                .then(CallSite::CreateIndexer, 400, "Name required"),
        );
        let report = run(transport.clone(), document).await;

        assert_eq!(
            report.tally(),
            vec![
                (1, 0, "A".to_string()),
                (0, 1, "#1".to_string()),
                (3, 0, "C".to_string()),
            ]
        );
        assert_eq!(transport.calls()[1].body.as_ref().unwrap(), &serde_json::json!({"fields": []}));
    }
}
