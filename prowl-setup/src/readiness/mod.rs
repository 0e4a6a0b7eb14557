//! Readiness layer
//!
//! Blocks the setup run until the target API answers its health check.
//! "Not ready yet" is not an error; only running out of time is.

pub mod prober;

pub use prober::{ReadinessError, ReadinessProber, ReadyReport};
