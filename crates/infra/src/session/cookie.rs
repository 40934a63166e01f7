//! Cookie-backed session token store
//!
//! Reads `session_token` from an incoming `Cookie` header and records the
//! `Set-Cookie` value the host must send back after a sign-in or sign-out.

use nowip_core::{SessionToken, SessionTokenStore, SESSION_COOKIE_NAME};
use parking_lot::RwLock;
use tracing::debug;

/// Session token store for one request/response cycle
#[derive(Default)]
pub struct CookieSessionStore {
    token: RwLock<Option<SessionToken>>,
    pending: RwLock<Option<String>>,
    secure: bool,
}

impl CookieSessionStore {
    /// Store seeded from a raw `Cookie` header value.
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        let token = header.and_then(parse_session_cookie);
        debug!(present = token.is_some(), "session cookie read");
        Self { token: RwLock::new(token), pending: RwLock::new(None), secure: false }
    }

    /// Mark emitted cookies `Secure`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// `Set-Cookie` value for the last change, if the token changed.
    pub fn set_cookie_header(&self) -> Option<String> {
        self.pending.read().clone()
    }

    fn cookie(&self, value: &str, max_age: Option<u64>) -> String {
        let mut cookie =
            format!("{SESSION_COOKIE_NAME}={}; Path=/; SameSite=Lax", urlencoding::encode(value));
        if let Some(max_age) = max_age {
            cookie.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

impl SessionTokenStore for CookieSessionStore {
    fn token(&self) -> Option<SessionToken> {
        self.token.read().clone()
    }

    fn store(&self, token: SessionToken) {
        *self.pending.write() = Some(self.cookie(token.expose(), None));
        *self.token.write() = Some(token);
    }

    fn clear(&self) {
        *self.pending.write() = Some(self.cookie("", Some(0)));
        *self.token.write() = None;
    }
}

/// Extract the session token from a `Cookie` header.
///
/// Empty values count as absent. Values are percent-decoded.
pub fn parse_session_cookie(header: &str) -> Option<SessionToken> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .and_then(|(_, value)| {
            let value = value.trim().trim_matches('"');
            let decoded = urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned());
            SessionToken::new(decoded)
        })
}
