//! nowip API client
//!
//! Implements the core `NowipApi` and `ClientConfigurator` ports over the
//! shared [`HttpClient`](crate::http::HttpClient). Every call reads the
//! settings installed by the last `configure`, so one client instance can be
//! handed to every store and page.

pub mod client;
pub mod errors;

pub use client::{ApiClient, ApiClientConfig, Envelope};
pub use errors::{ApiError, ApiErrorCategory};
