//! Shared reqwest client with timeout and retry

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
