//! Domain list and detail pages

use nowip_core::Session;
use nowip_domain::{full_domain, Domain, DomainId, NowipError, Result};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::execute_logged;

/// Domain as shown on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainView {
    pub id: DomainId,
    pub name: String,
    /// Name qualified with the base DNS zone.
    pub full_name: String,
}

impl DomainView {
    fn new(domain: &Domain, base_domain: &str) -> Self {
        Self {
            id: domain.id,
            name: domain.name.clone(),
            full_name: full_domain(&domain.name, base_domain),
        }
    }
}

/// Domains of the signed-in user, loading the account first if needed.
///
/// # Errors
/// Returns the account or domain-list load failure when nothing is cached,
/// so an expired session is not shown as an empty list.
pub async fn list_domains(ctx: &AppContext, session: &Session) -> Result<Vec<DomainView>> {
    execute_logged("domains::list", async {
        let accounts = session.accounts();
        accounts.use_account().await;

        let domains = session.domains().domains();
        if domains.is_empty() {
            if let Some(err) = accounts.status().error() {
                return Err(err.clone());
            }
            if let Some(err) = session.domains().status().error() {
                return Err(err.clone());
            }
        }

        Ok(domains.iter().map(|d| DomainView::new(d, ctx.base_domain())).collect())
    })
    .await
}

/// Domain behind the `:id` route parameter.
///
/// # Errors
/// Returns `NowipError::NotFound` when the id is malformed or the domain
/// cannot be loaded.
pub async fn domain_detail(ctx: &AppContext, session: &Session, raw_id: &str) -> Result<DomainView> {
    execute_logged("domains::detail", async {
        session
            .domains()
            .get_by_route_param(raw_id)
            .await
            .map(|domain| DomainView::new(&domain, ctx.base_domain()))
            .ok_or_else(|| NowipError::NotFound(format!("domain {raw_id}")))
    })
    .await
}
