//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the target API. Indexer and
//! proxy bodies are not modelled here: they are forwarded as opaque JSON.

pub mod health;
pub mod tag;
