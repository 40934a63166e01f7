//! Port interfaces for the nowip HTTP API
//!
//! The stores only need three read operations. Implementations decide the
//! transport; the reqwest client lives in `nowip-infra`.

use async_trait::async_trait;
use nowip_domain::{Account, Domain, DomainId, Result};

/// Read operations on the signed-in user's data
#[async_trait]
pub trait NowipApi: Send + Sync {
    /// Fetch the current user's account
    async fn get_account(&self) -> Result<Account>;

    /// List every domain owned by the current user
    async fn get_domains(&self) -> Result<Vec<Domain>>;

    /// Fetch one domain by id
    async fn get_domain(&self, id: DomainId) -> Result<Domain>;
}
