//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use nowip_core::{RouteConfig, Session};
use nowip_domain::{Config, Result};
use nowip_infra::{ApiClient, CookieSessionStore, DevProxy, HttpClient};
use tracing::debug;

/// Session bound to one incoming request, plus its cookie store
pub struct RequestSession {
    pub session: Session,
    pub api: Arc<ApiClient>,
    pub cookies: Arc<CookieSessionStore>,
}

impl RequestSession {
    /// `Set-Cookie` value to send back, if the session token changed.
    pub fn set_cookie_header(&self) -> Option<String> {
        self.cookies.set_cookie_header()
    }
}

/// Application context - holds configuration and shared clients
pub struct AppContext {
    pub config: Config,
    pub routes: RouteConfig,
    http: HttpClient,
}

impl AppContext {
    /// Build the context for `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .user_agent(concat!("nowip/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, routes: RouteConfig::default(), http })
    }

    /// Zone appended to bare domain names.
    pub fn base_domain(&self) -> &str {
        &self.config.dns.base_domain
    }

    /// Fresh session for a request carrying `cookie_header`.
    ///
    /// Each session gets its own API client so credentials never leak
    /// between users; the connection pool is shared.
    pub fn session_for_cookie(&self, cookie_header: Option<&str>) -> RequestSession {
        let secure = self.config.api.base_url.starts_with("https://");
        let cookies = Arc::new(CookieSessionStore::from_cookie_header(cookie_header).secure(secure));
        let api = Arc::new(ApiClient::with_http(self.http.clone(), &self.config.api.base_url));
        let session = Session::with_routes(api.clone(), cookies.clone(), self.routes.clone());

        debug!(signed_in = session.is_signed_in(), "request session created");
        RequestSession { session, api, cookies }
    }

    /// Development proxy for the configured target.
    ///
    /// The proxy has its own client; the API client's retries and redirect
    /// following must not apply to relayed traffic.
    ///
    /// # Errors
    /// Returns an error if the proxy's HTTP client cannot be created.
    pub fn dev_proxy(&self) -> Result<DevProxy> {
        DevProxy::from_config(&self.config)
    }
}
