//! Core domain types
//!
//! These types describe what gets pushed into the target API and how each
//! call turned out. They are shared between the client, the setup driver,
//! the CLI and the stub server.

pub mod call;
pub mod credential;
pub mod indexer;
pub mod proxy;
pub mod report;
