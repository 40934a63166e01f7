//! Session token newtype

use std::fmt;

/// Cookie the login flow stores the token under.
pub const SESSION_COOKIE_NAME: &str = "session_token";

/// Opaque bearer credential of a signed-in user
///
/// Never empty. The value is only reachable through [`SessionToken::expose`]
/// and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap `raw`, or `None` when it is empty.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The raw token, for building headers and cookies.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}
