//! API-specific error types
//!
//! Classifies failures of nowip API calls before they are folded into
//! [`NowipError`] for the stores.

use nowip_domain::NowipError;
use reqwest::StatusCode;
use thiserror::Error;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403) - the session token was rejected
    Authentication,
    /// Rate limiting errors (429) - retry with backoff
    RateLimit,
    /// Server errors (5xx) - retryable
    Server,
    /// Client errors (4xx except auth) - non-retryable
    Client,
    /// Network/connection errors - retryable
    Network,
    /// Configuration errors - non-retryable
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// 2xx response whose envelope reports `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) | Self::Client(_) | Self::Rejected(_) | Self::Decode(_) => {
                ApiErrorCategory::Client
            }
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Check if this error should be retried
    ///
    /// A rejected session token stays rejected, so authentication errors are
    /// not retried.
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode, url: &str, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Auth(message)
        } else if status == StatusCode::NOT_FOUND {
            Self::NotFound(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimit(message)
        } else if status.is_server_error() {
            Self::Server(message)
        } else if status.is_client_error() {
            Self::Client(message)
        } else {
            Self::Network(message)
        }
    }
}

impl From<NowipError> for ApiError {
    fn from(err: NowipError) -> Self {
        match err {
            NowipError::Network(message) => Self::Network(message),
            NowipError::Auth(message) => Self::Auth(message),
            NowipError::Config(message) => Self::Config(message),
            NowipError::NotFound(message) => Self::NotFound(message),
            NowipError::InvalidInput(message) => Self::Client(message),
            NowipError::Api(message) => Self::Rejected(message),
            NowipError::Internal(message) => Self::Server(message),
        }
    }
}

impl From<ApiError> for NowipError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err {
            ApiError::Auth(_) => Self::Auth(message),
            ApiError::NotFound(_) => Self::NotFound(message),
            ApiError::Client(_) => Self::InvalidInput(message),
            ApiError::RateLimit(_) | ApiError::Server(_) | ApiError::Network(_) => {
                Self::Network(message)
            }
            ApiError::Config(_) => Self::Config(message),
            ApiError::Rejected(_) | ApiError::Decode(_) => Self::Api(message),
        }
    }
}
