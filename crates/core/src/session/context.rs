//! Session context: one instance per signed-in user
//!
//! Owns the account and domain stores and the guard that fills them. Pages
//! and the router receive this object instead of reaching for globals.

use std::sync::Arc;

use tracing::info;

use super::ports::SessionTokenStore;
use super::token::SessionToken;
use crate::api::NowipApi;
use crate::client::ClientConfigurator;
use crate::navigation::{NavigationGuard, RouteConfig, RouteTarget};
use crate::stores::{AccountStore, DomainStore, LoadStatus};

/// API handle for a page, plus where to send the user if signed out
pub struct ApiAccess {
    pub api: Arc<dyn NowipApi>,
    /// Login redirect when no session token is present.
    pub redirect: Option<String>,
}

impl std::fmt::Debug for ApiAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiAccess").field("redirect", &self.redirect).finish_non_exhaustive()
    }
}

pub struct Session {
    api: Arc<dyn NowipApi>,
    client: Arc<dyn ClientConfigurator>,
    tokens: Arc<dyn SessionTokenStore>,
    accounts: Arc<AccountStore>,
    domains: Arc<DomainStore>,
    guard: NavigationGuard,
}

impl Session {
    /// Session with the default route layout.
    pub fn new<C>(client: Arc<C>, tokens: Arc<dyn SessionTokenStore>) -> Self
    where
        C: NowipApi + ClientConfigurator + 'static,
    {
        Self::with_routes(client, tokens, RouteConfig::default())
    }

    pub fn with_routes<C>(
        client: Arc<C>,
        tokens: Arc<dyn SessionTokenStore>,
        routes: RouteConfig,
    ) -> Self
    where
        C: NowipApi + ClientConfigurator + 'static,
    {
        let api: Arc<dyn NowipApi> = client.clone();
        let configurator: Arc<dyn ClientConfigurator> = client;

        let domains = Arc::new(DomainStore::new(Arc::clone(&api)));
        let accounts = Arc::new(AccountStore::new(Arc::clone(&api), Arc::clone(&domains)));
        let guard = NavigationGuard::new(
            Arc::clone(&tokens),
            Arc::clone(&configurator),
            Arc::clone(&accounts),
            routes,
        );

        Self { api, client: configurator, tokens, accounts, domains, guard }
    }

    pub fn accounts(&self) -> &Arc<AccountStore> {
        &self.accounts
    }

    pub fn domains(&self) -> &Arc<DomainStore> {
        &self.domains
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Whether a session token is present.
    pub fn is_signed_in(&self) -> bool {
        self.tokens.token().is_some()
    }

    /// Guard a transition; shorthand for `guard().before_each`.
    pub async fn navigate(&self, target: &RouteTarget) -> crate::navigation::GuardDecision {
        self.guard.before_each(target).await
    }

    /// Configure the client from the session cookie and hand out the API.
    ///
    /// Without a token the access carries the login redirect for `current`,
    /// unless `disable_auth_redirect` is set.
    pub fn api_for(&self, current: &RouteTarget, disable_auth_redirect: bool) -> ApiAccess {
        let token = self.tokens.token();
        self.client.configure(token.as_ref().map(SessionToken::expose));

        let redirect = if token.is_none() && !disable_auth_redirect {
            Some(self.guard.routes().login_redirect(current.full_path()))
        } else {
            None
        };

        ApiAccess { api: Arc::clone(&self.api), redirect }
    }

    /// Adopt `token` and load the account behind it.
    ///
    /// Data from any previous session is dropped first. An empty token
    /// signs out instead.
    pub async fn sign_in(&self, token: &str) -> LoadStatus {
        let Some(token) = SessionToken::new(token) else {
            self.sign_out();
            return LoadStatus::Unloaded;
        };

        self.client.configure(Some(token.expose()));
        self.tokens.store(token);
        self.accounts.clear();

        let status = self.accounts.fetch_and_set().await;
        info!(loaded = status.is_loaded(), "signed in");
        status
    }

    /// Forget the token and everything loaded with it.
    pub fn sign_out(&self) {
        self.tokens.clear();
        self.client.configure(None);
        self.accounts.clear();
        info!("signed out");
    }
}
