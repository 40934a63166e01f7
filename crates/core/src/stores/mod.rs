//! Reactive caches for the signed-in user's data
//!
//! Both stores publish their state on a `tokio::sync::watch` channel.
//! Holders of a receiver see every update without re-subscribing, and all
//! mutation goes through the store methods.

pub mod account;
pub mod domain;

use nowip_domain::NowipError;

pub use account::{AccountState, AccountStore};
pub use domain::{DomainState, DomainStore};

/// Where a store's data came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing fetched since creation or the last clear.
    #[default]
    Unloaded,
    /// A fetch is in flight.
    Loading,
    /// Data reflects the last successful fetch or `set`.
    Loaded,
    /// The last fetch failed; previous data, if any, is still in place.
    Failed(NowipError),
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Error of the last failed fetch.
    pub fn error(&self) -> Option<&NowipError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
