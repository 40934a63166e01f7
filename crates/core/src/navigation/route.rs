//! Route targets and the fixed route layout

/// Destination of an attempted transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    full_path: String,
    path_len: usize,
}

impl RouteTarget {
    /// Parse a full path such as `/domains/4?tab=records#ttl`.
    pub fn new(full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        let path_len = full_path.find(['?', '#']).unwrap_or(full_path.len());
        Self { full_path, path_len }
    }

    /// Path including query string and fragment.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// Path without query string or fragment.
    pub fn path(&self) -> &str {
        &self.full_path[..self.path_len]
    }
}

impl From<&str> for RouteTarget {
    fn from(full_path: &str) -> Self {
        Self::new(full_path)
    }
}

/// Paths the guard routes between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub home: String,
    pub login: String,
    /// Everything at or below this prefix is reachable without a session.
    pub auth_prefix: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/auth/login".to_string(),
            auth_prefix: "/auth".to_string(),
        }
    }
}

impl RouteConfig {
    /// Whether `path` lies in the auth area.
    ///
    /// Matches on a segment boundary: `/auth` and `/auth/login` are in,
    /// `/authors` is not.
    pub fn is_auth_path(&self, path: &str) -> bool {
        let prefix = self.auth_prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Login page that returns to `destination` afterwards.
    pub fn login_redirect(&self, destination: &str) -> String {
        format!("{}?url={}", self.login, urlencoding::encode(destination))
    }
}
