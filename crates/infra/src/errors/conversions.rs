//! Conversions from external infrastructure errors into domain errors.

use nowip_domain::NowipError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub NowipError);

impl From<InfraError> for NowipError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<NowipError> for InfraError {
    fn from(value: NowipError) -> Self {
        InfraError(value)
    }
}

trait IntoNowipError {
    fn into_nowip(self) -> NowipError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → NowipError */
/* -------------------------------------------------------------------------- */

impl IntoNowipError for HttpError {
    fn into_nowip(self) -> NowipError {
        if self.is_timeout() {
            return NowipError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return NowipError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return NowipError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return NowipError::Api(format!("malformed response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => NowipError::Auth(message),
                404 => NowipError::NotFound(message),
                400..=499 if code != 429 => NowipError::InvalidInput(message),
                _ => NowipError::Network(message),
            };
        }

        NowipError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_nowip())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / io → NowipError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(NowipError::Api(format!("malformed JSON: {value}")))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(NowipError::Internal(format!("I/O failure: {value}")))
    }
}
