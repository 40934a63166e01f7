//! Session token persistence

pub mod cookie;

pub use cookie::CookieSessionStore;
