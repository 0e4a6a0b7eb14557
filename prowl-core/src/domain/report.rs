//! Provisioning report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::call::{CallOutcome, CallSite};
use crate::domain::indexer::IndexerBranch;

/// One call issued while provisioning an indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub site: CallSite,
    pub succeeded: bool,
    pub status: Option<u16>,
}

impl CallRecord {
    pub fn from_outcome(site: CallSite, outcome: &CallOutcome) -> Self {
        Self {
            site,
            succeeded: outcome.is_success(),
            status: outcome.status(),
        }
    }
}

/// Result of provisioning a single indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerReport {
    pub name: String,
    pub branch: IndexerBranch,
    pub calls: Vec<CallRecord>,
}

impl IndexerReport {
    pub fn new(name: impl Into<String>, branch: IndexerBranch) -> Self {
        Self {
            name: name.into(),
            branch,
            calls: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.calls.iter().filter(|c| c.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.calls.len() - self.succeeded()
    }
}

/// Summary of a whole provisioning pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub indexers: Vec<IndexerReport>,
}

impl ProvisionReport {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            indexers: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// `(succeeded, failed, indexer_name)` per indexer, in input order
    pub fn tally(&self) -> Vec<(usize, usize, String)> {
        self.indexers
            .iter()
            .map(|r| (r.succeeded(), r.failed(), r.name.clone()))
            .collect()
    }

    /// Number of calls that failed across all indexers
    pub fn failed_calls(&self) -> usize {
        self.indexers.iter().map(IndexerReport::failed).sum()
    }

    /// Number of indexers with at least one failed call
    pub fn indexers_with_failures(&self) -> usize {
        self.indexers.iter().filter(|r| r.failed() > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: CallSite, succeeded: bool) -> CallRecord {
        CallRecord {
            site,
            succeeded,
            status: Some(if succeeded { 201 } else { 400 }),
        }
    }

    #[test]
    fn test_tally() {
        let mut report = ProvisionReport::start();

        let mut a = IndexerReport::new("A", IndexerBranch::Direct);
        a.calls.push(record(CallSite::CreateIndexer, true));

        let mut b = IndexerReport::new("B", IndexerBranch::Captcha);
        b.calls.push(record(CallSite::CreateIndexer, false));
        b.calls.push(record(CallSite::CheckCaptcha, true));
        b.calls.push(record(CallSite::CreateIndexer, true));

        report.indexers.push(a);
        report.indexers.push(b);
        report.finish();

        assert_eq!(
            report.tally(),
            vec![(1, 0, "A".to_string()), (2, 1, "B".to_string())]
        );
        assert_eq!(report.failed_calls(), 1);
        assert_eq!(report.indexers_with_failures(), 1);
        assert!(report.finished_at.is_some());
    }
}
