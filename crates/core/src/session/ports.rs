//! Port interface for the cookie-backed session token

use super::token::SessionToken;

/// Read/write access to the session token the host keeps in a cookie
pub trait SessionTokenStore: Send + Sync {
    /// Current token, `None` when signed out.
    fn token(&self) -> Option<SessionToken>;

    /// Persist a token after a successful login.
    fn store(&self, token: SessionToken);

    /// Forget the token.
    fn clear(&self);
}
