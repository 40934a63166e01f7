//! # nowip App
//!
//! Application layer: dependency wiring and page-level commands.
//!
//! This crate contains:
//! - Application context (configuration, shared HTTP client, per-request
//!   sessions)
//! - Commands pages call to read domains and validate DNS records
//! - The `nowip` binary serving the development proxy
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

pub use context::{AppContext, RequestSession};
