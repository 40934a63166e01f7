//! Development reverse proxy
//!
//! Forwards `/api/proxy/*` to the configured upstream with the prefix
//! stripped, so a local front end can reach a remote API without CORS. The
//! proxy refuses to run outside a development environment.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use nowip_domain::{Config, NowipError, Result, DEV_PROXY_PREFIX};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::http::HttpClient;

/// Response body when the proxy is disabled.
pub const PROXY_DISABLED_MESSAGE: &str = "Proxy only runs in development.";

const HOP_BY_HOP: [header::HeaderName; 6] = [
    header::CONNECTION,
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::TE,
    header::UPGRADE,
];

/// Forwarding state shared by every request
#[derive(Clone)]
pub struct DevProxy {
    http: HttpClient,
    target: String,
    active: bool,
}

impl DevProxy {
    /// Proxy for `target` with its own client.
    ///
    /// Upstream responses are relayed unchanged: redirects go back to the
    /// browser and nothing is retried.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(target: &str, active: bool) -> Result<Self> {
        let http = HttpClient::builder().max_attempts(1).follow_redirects(false).build()?;
        Ok(Self::with_http(http, target, active))
    }

    /// Proxy forwarding through `http`.
    pub fn with_http(http: HttpClient, target: &str, active: bool) -> Self {
        Self { http, target: target.trim_end_matches('/').to_string(), active }
    }

    /// Proxy configured from the `dev_proxy` section and the environment.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.dev_proxy.target, config.dev_proxy_active())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Upstream URL for a request path under the proxy prefix.
    pub fn upstream_url(&self, uri: &Uri) -> String {
        let rest = uri.path().strip_prefix(DEV_PROXY_PREFIX).unwrap_or(uri.path());
        let path = if rest.is_empty() { "/" } else { rest };
        match uri.query() {
            Some(query) => format!("{}{}?{}", self.target, path, query),
            None => format!("{}{}", self.target, path),
        }
    }

    /// Router serving `/api/proxy` and everything below it.
    pub fn router(self) -> Router {
        Router::new()
            .route(DEV_PROXY_PREFIX, any(forward))
            .route(&format!("{DEV_PROXY_PREFIX}/{{*rest}}"), any(forward))
            .with_state(Arc::new(self))
    }
}

async fn forward(
    State(proxy): State<Arc<DevProxy>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !proxy.active {
        debug!(path = uri.path(), "dev proxy disabled, refusing request");
        return (StatusCode::FORBIDDEN, PROXY_DISABLED_MESSAGE).into_response();
    }

    let url = proxy.upstream_url(&uri);
    debug!(%method, %url, "forwarding through dev proxy");

    match relay(&proxy.http, method, &url, headers, body).await {
        Ok(response) => response,
        Err(err) => {
            warn!(%url, error = %err, "dev proxy upstream failed");
            (StatusCode::BAD_GATEWAY, format!("Dev proxy error: {err}")).into_response()
        }
    }
}

async fn relay(
    http: &HttpClient,
    method: Method,
    url: &str,
    mut headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    strip_hop_by_hop(&mut headers);

    let request = http.request(method, url).headers(headers).body(body);
    let upstream = http.send(request).await?;

    let status = upstream.status();
    let mut response_headers = upstream.headers().clone();
    strip_hop_by_hop(&mut response_headers);

    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| NowipError::Network(format!("failed to read upstream body: {e}")))?;

    Ok((status, response_headers, bytes).into_response())
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Serve the proxy on `addr` until `shutdown` resolves.
///
/// # Errors
/// Returns `NowipError::Network` when the address cannot be bound or the
/// server fails.
pub async fn serve<F>(proxy: DevProxy, addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| NowipError::Network(format!("failed to bind dev proxy on {addr}: {err}")))?;

    let local = listener
        .local_addr()
        .map_err(|err| NowipError::Network(format!("failed to determine address: {err}")))?;
    info!(addr = %local, target = %proxy.target, active = proxy.active, "dev proxy listening");

    axum::serve(listener, proxy.router())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| NowipError::Network(format!("dev proxy server error: {err}")))
}
