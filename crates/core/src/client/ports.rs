//! Port interface for reconfiguring the shared API client

use super::settings::ClientSettings;

/// Reconfigures the API client that every store and page shares
///
/// Implementations swap the effective [`ClientSettings`] so the next request
/// from any holder of the client uses them.
pub trait ClientConfigurator: Send + Sync {
    /// Install the base URL and, for a non-empty token, a bearer header.
    ///
    /// `None` or an empty token removes any previous Authorization header.
    /// Calling twice with the same token yields the same settings.
    fn configure(&self, token: Option<&str>);

    /// Settings currently in effect.
    fn settings(&self) -> ClientSettings;
}
