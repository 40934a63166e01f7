//! Per-user session: token access and the stores bound to it

pub mod context;
pub mod ports;
pub mod token;

pub use context::{ApiAccess, Session};
pub use ports::SessionTokenStore;
pub use token::{SessionToken, SESSION_COOKIE_NAME};
