//! # nowip Domain
//!
//! Domain types and models for the nowip dynamic DNS front end.
//!
//! This crate contains:
//! - API data types (Account, Domain)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - DNS record schemas and validation
//!
//! ## Architecture
//! - No dependencies on other nowip crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod dns;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
