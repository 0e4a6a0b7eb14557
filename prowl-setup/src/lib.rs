//! Prowl Setup
//!
//! Bootstraps a freshly started indexer-aggregation service through its
//! administrative API.
//!
//! Architecture:
//! - Bootstrap: credential generation/reuse and persisted state reset
//! - Inputs: indexer document and proxy template, checked before any call
//! - Executor: one request at a time, with a per-call failure policy
//! - Readiness: health polling with an upper bound
//! - Services: tag, proxy and indexer stages
//! - Pipeline: the stages in their fixed order
//!
//! Everything runs sequentially. A failure at a fatal call site ends the run
//! with [`SetupError::FatalStage`]; failures while provisioning indexers are
//! collected in the [`ProvisionReport`](prowl_core::domain::report::ProvisionReport).

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod executor;
pub mod inputs;
pub mod pipeline;
pub mod readiness;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{Result, SetupError};
pub use pipeline::{SetupRun, SetupSummary, run_from_config};
