//! Prowl Core
//!
//! Core types shared by the Prowl bootstrap tooling.
//!
//! This crate contains:
//! - Domain types: indexer and proxy definitions, call outcomes, run reports
//! - DTOs: request/response bodies exchanged with the target API

pub mod domain;
pub mod dto;
