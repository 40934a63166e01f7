//! # nowip Core
//!
//! Session, store and navigation logic for the nowip front end.
//!
//! This crate contains:
//! - Port interfaces for the API client, client configuration and the
//!   session cookie
//! - The account and domain stores
//! - The navigation guard and the per-user session context
//!
//! No HTTP or platform code lives here; `nowip-infra` provides the adapters.

pub mod api;
pub mod client;
pub mod navigation;
pub mod session;
pub mod stores;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::NowipApi;
pub use client::{ClientConfigurator, ClientSettings, AUTHORIZATION_HEADER};
pub use navigation::{GuardDecision, NavigationGuard, RouteConfig, RouteTarget};
pub use session::{ApiAccess, Session, SessionToken, SessionTokenStore, SESSION_COOKIE_NAME};
pub use stores::{AccountState, AccountStore, DomainState, DomainStore, LoadStatus};
