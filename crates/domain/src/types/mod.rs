//! Data types exchanged with the nowip API

pub mod account;
pub mod domain;

pub use account::{Account, AccountId};
pub use domain::{full_domain, parse_domain_id, Domain, DomainId};
