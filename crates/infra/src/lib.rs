//! # nowip Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP client and nowip API client
//! - The cookie-backed session token store
//! - Configuration loading
//! - Tracing setup and the development proxy
//!
//! ## Architecture
//! - Implements traits defined in `nowip-core`
//! - Contains all "impure" code (network, environment, files)

pub mod api;
pub mod config;
pub mod dev_proxy;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiErrorCategory};
pub use dev_proxy::DevProxy;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_tracing;
pub use session::CookieSessionStore;
