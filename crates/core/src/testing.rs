//! In-memory test doubles for the core ports
//!
//! Enabled for this crate's own tests and, through the `test-utils` feature,
//! for downstream crates.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use nowip_domain::{Account, Domain, DomainId, NowipError, Result};
use parking_lot::{Mutex, RwLock};

use crate::api::NowipApi;
use crate::client::{ClientConfigurator, ClientSettings};
use crate::session::{SessionToken, SessionTokenStore};

/// Base URL the mock client reports.
pub const MOCK_BASE_URL: &str = "http://api.mock";

/// Scripted API client that counts calls and records configuration
pub struct MockApiClient {
    account: Mutex<Result<Account>>,
    domains: Mutex<Result<Vec<Domain>>>,
    lookups: Mutex<HashMap<DomainId, Domain>>,
    latency: Mutex<Option<Duration>>,
    settings: RwLock<ClientSettings>,
    configured: Mutex<Vec<Option<String>>>,
    account_calls: AtomicUsize,
    domains_calls: AtomicUsize,
    domain_calls: AtomicUsize,
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApiClient {
    /// Client answering with an empty account and no domains.
    pub fn new() -> Self {
        Self {
            account: Mutex::new(Ok(Account::default())),
            domains: Mutex::new(Ok(Vec::new())),
            lookups: Mutex::new(HashMap::new()),
            latency: Mutex::new(None),
            settings: RwLock::new(ClientSettings::for_token(MOCK_BASE_URL, None)),
            configured: Mutex::new(Vec::new()),
            account_calls: AtomicUsize::new(0),
            domains_calls: AtomicUsize::new(0),
            domain_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_account(&self, account: Account) {
        *self.account.lock() = Ok(account);
    }

    pub fn fail_account(&self, error: NowipError) {
        *self.account.lock() = Err(error);
    }

    pub fn set_domains(&self, domains: Vec<Domain>) {
        *self.domains.lock() = Ok(domains);
    }

    pub fn fail_domains(&self, error: NowipError) {
        *self.domains.lock() = Err(error);
    }

    /// Make `GET /domains/{id}` succeed for this domain.
    pub fn add_lookup(&self, domain: Domain) {
        self.lookups.lock().insert(domain.id, domain);
    }

    /// Delay every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    pub fn get_account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    pub fn get_domains_calls(&self) -> usize {
        self.domains_calls.load(Ordering::SeqCst)
    }

    pub fn get_domain_calls(&self) -> usize {
        self.domain_calls.load(Ordering::SeqCst)
    }

    /// Tokens passed to `configure`, oldest first.
    pub fn configured_tokens(&self) -> Vec<Option<String>> {
        self.configured.lock().clone()
    }

    async fn respond(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl NowipApi for MockApiClient {
    async fn get_account(&self) -> Result<Account> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await;
        self.account.lock().clone()
    }

    async fn get_domains(&self) -> Result<Vec<Domain>> {
        self.domains_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await;
        self.domains.lock().clone()
    }

    async fn get_domain(&self, id: DomainId) -> Result<Domain> {
        self.domain_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await;
        self.lookups
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| NowipError::NotFound(format!("domain {id}")))
    }
}

impl ClientConfigurator for MockApiClient {
    fn configure(&self, token: Option<&str>) {
        self.configured.lock().push(token.map(str::to_string));
        *self.settings.write() = ClientSettings::for_token(MOCK_BASE_URL, token);
    }

    fn settings(&self) -> ClientSettings {
        self.settings.read().clone()
    }
}

/// Session token store kept in memory
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SessionToken>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<SessionToken>) -> Self {
        Self { token: RwLock::new(token) }
    }
}

impl SessionTokenStore for MemoryTokenStore {
    fn token(&self) -> Option<SessionToken> {
        self.token.read().clone()
    }

    fn store(&self, token: SessionToken) {
        *self.token.write() = Some(token);
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}
