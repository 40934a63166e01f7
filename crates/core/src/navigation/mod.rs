//! Route guarding for the web front end

pub mod guard;
pub mod route;

pub use guard::{GuardDecision, NavigationGuard};
pub use route::{RouteConfig, RouteTarget};
