//! HTTP implementation of the nowip API ports

use std::time::Duration;

use async_trait::async_trait;
use nowip_core::{ClientConfigurator, ClientSettings, NowipApi};
use nowip_domain::{Account, ApiConfig, Domain, DomainId, NowipError, Result};
use parking_lot::RwLock;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://api.nowip.is-on.net")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Total attempts for idempotent requests
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_attempts: 3,
        }
    }
}

/// Response wrapper used by every nowip endpoint
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Payload of a successful response.
    ///
    /// # Errors
    /// `Rejected` when the API reports failure, `Decode` when a successful
    /// response carries no data.
    pub fn into_data(self) -> std::result::Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Decode("successful response without data".into())),
            (false, _) => {
                Err(ApiError::Rejected(self.message.unwrap_or_else(|| "request failed".into())))
            }
        }
    }
}

/// API client bound to the session's current credentials
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    settings: RwLock<ClientSettings>,
}

impl ApiClient {
    /// Create an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns error if the HttpClient cannot be created
    pub fn new(config: ApiClientConfig) -> std::result::Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .user_agent(concat!("nowip/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self::with_http(http, &config.base_url))
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_http(http: HttpClient, base_url: &str) -> Self {
        let settings = ClientSettings::for_token(base_url, None);
        Self { http, base_url: settings.base_url().to_string(), settings: RwLock::new(settings) }
    }

    /// Execute a GET request and unwrap the response envelope
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the status is not 2xx, the body
    /// cannot be decoded or the envelope reports failure
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, ApiError> {
        let settings = self.settings();
        let url = settings.url(path);

        debug!(url = %url, authenticated = settings.is_authenticated(), "GET request");

        let mut request = self.http.request(Method::GET, &url).header("Accept", "application/json");
        for (name, value) in settings.headers() {
            request = request.header(name, value);
        }

        let response = self.http.send(request).await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &url, &body));
        }

        if status == StatusCode::NO_CONTENT {
            return Err(ApiError::Decode(format!("{url} returned no content")));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))?;

        envelope.into_data().inspect_err(|err| {
            warn!(path = %path, error = %err, "API reported failure");
        })
    }
}

#[async_trait]
impl NowipApi for ApiClient {
    async fn get_account(&self) -> Result<Account> {
        self.get("/account").await.map_err(NowipError::from)
    }

    async fn get_domains(&self) -> Result<Vec<Domain>> {
        self.get("/domains").await.map_err(NowipError::from)
    }

    async fn get_domain(&self, id: DomainId) -> Result<Domain> {
        self.get(&format!("/domains/{id}")).await.map_err(NowipError::from)
    }
}

impl ClientConfigurator for ApiClient {
    fn configure(&self, token: Option<&str>) {
        let next = ClientSettings::for_token(self.base_url.as_str(), token);
        let mut current = self.settings.write();
        if *current != next {
            debug!(authenticated = next.is_authenticated(), "API client reconfigured");
            *current = next;
        }
    }

    fn settings(&self) -> ClientSettings {
        self.settings.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> ApiClient {
        let config = ApiClientConfig {
            base_url: server.uri(),
            max_attempts: 1,
            ..ApiClientConfig::default()
        };
        ApiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn configure_toggles_bearer_header() {
        let server = MockServer::start().await;
        let client = client(&server);

        client.configure(Some("abc"));
        assert_eq!(client.settings().authorization().as_deref(), Some("Bearer abc"));

        client.configure(Some(""));
        assert!(client.settings().authorization().is_none());
        assert_eq!(client.settings().base_url(), server.uri());
    }

    #[tokio::test]
    async fn get_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "id": 5, "username": "eve" }
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        client.configure(Some("tok"));

        let account = client.get_account().await.unwrap();
        assert_eq!(account.id, Some(5));
        assert_eq!(account.username.as_deref(), Some("eve"));
    }

    #[tokio::test]
    async fn unsuccessful_envelope_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "account suspended"
            })))
            .mount(&server)
            .await;

        let err = client(&server).get_domains().await.unwrap_err();
        match err {
            NowipError::Api(message) => assert!(message.contains("account suspended")),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_codes_map_to_domain_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/domains/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(matches!(client.get_account().await, Err(NowipError::Auth(_))));
        assert!(matches!(client.get_domain(99).await, Err(NowipError::NotFound(_))));
    }

    #[test]
    fn envelope_without_data_is_rejected() {
        let envelope: Envelope<Domain> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(matches!(envelope.into_data(), Err(ApiError::Decode(_))));
    }
}
