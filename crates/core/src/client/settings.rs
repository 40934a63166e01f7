//! Effective client settings

use std::fmt;

use crate::session::SessionToken;

/// Header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Base URL plus optional bearer credential
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    base_url: String,
    bearer: Option<SessionToken>,
}

impl ClientSettings {
    /// Settings for `base_url`, authenticated when `token` is non-empty.
    pub fn for_token(base_url: impl Into<String>, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: token.and_then(SessionToken::new),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests will carry a bearer header.
    pub fn is_authenticated(&self) -> bool {
        self.bearer.is_some()
    }

    /// Value of the Authorization header, if any.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {}", token.expose()))
    }

    /// Headers every request must carry.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        self.authorization().map(|value| (AUTHORIZATION_HEADER, value)).into_iter().collect()
    }

    /// Absolute URL for an API path such as `/domains`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
