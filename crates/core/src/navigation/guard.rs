//! Navigation guard run before every route transition

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::route::{RouteConfig, RouteTarget};
use crate::client::ClientConfigurator;
use crate::session::SessionTokenStore;
use crate::stores::AccountStore;

/// Outcome of guarding one transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "to", rename_all = "lowercase")]
pub enum GuardDecision {
    /// Let the transition complete.
    Allow,
    /// Abort and start a new transition to this full path.
    Redirect(String),
}

impl GuardDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Redirect location, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Redirect(location) => Some(location),
        }
    }
}

/// Decides whether a transition proceeds and warms the account store
///
/// Signed-out users are sent to login with their destination preserved;
/// signed-in users are kept out of the auth area. Fetch failures never
/// block navigation.
pub struct NavigationGuard {
    tokens: Arc<dyn SessionTokenStore>,
    client: Arc<dyn ClientConfigurator>,
    accounts: Arc<AccountStore>,
    routes: RouteConfig,
}

impl NavigationGuard {
    pub fn new(
        tokens: Arc<dyn SessionTokenStore>,
        client: Arc<dyn ClientConfigurator>,
        accounts: Arc<AccountStore>,
        routes: RouteConfig,
    ) -> Self {
        Self { tokens, client, accounts, routes }
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    /// Guard the transition to `target`.
    pub async fn before_each(&self, target: &RouteTarget) -> GuardDecision {
        let token = self.tokens.token();
        self.client.configure(token.as_ref().map(|token| token.expose()));

        let signed_in = token.is_some();
        let decision = if self.routes.is_auth_path(target.path()) {
            if signed_in {
                self.load_account().await;
                GuardDecision::Redirect(self.routes.home.clone())
            } else {
                GuardDecision::Allow
            }
        } else if signed_in {
            self.load_account().await;
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(self.routes.login_redirect(target.full_path()))
        };

        let decision = self.break_loop(target, decision);
        debug!(path = target.path(), signed_in, ?decision, "route guarded");
        decision
    }

    async fn load_account(&self) {
        self.accounts.use_account().await;
        if let Some(err) = self.accounts.status().error() {
            warn!(error = %err, "account unavailable, continuing navigation");
        }
    }

    /// A redirect back to the guarded path would never settle; let it through.
    fn break_loop(&self, target: &RouteTarget, decision: GuardDecision) -> GuardDecision {
        match decision {
            GuardDecision::Redirect(location)
                if RouteTarget::new(location.as_str()).path() == target.path() =>
            {
                warn!(path = target.path(), "guard redirect points at itself, allowing");
                GuardDecision::Allow
            }
            other => other,
        }
    }
}
