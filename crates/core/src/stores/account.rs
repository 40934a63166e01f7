//! Account store: the signed-in user's account record

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nowip_domain::{Account, NowipError};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use super::{DomainStore, LoadStatus};
use crate::api::NowipApi;

/// Snapshot published to observers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountState {
    pub account: Account,
    pub status: LoadStatus,
}

/// Reactive cache of the signed-in account
///
/// A successful fetch also refreshes the domain store, so pages that show
/// the account can rely on the domain list being current.
pub struct AccountStore {
    api: Arc<dyn NowipApi>,
    domains: Arc<DomainStore>,
    state: watch::Sender<AccountState>,
    /// Serializes fetches so concurrent `use_account` calls issue one request.
    fetch_lock: Mutex<()>,
    epoch: AtomicU64,
}

impl AccountStore {
    pub fn new(api: Arc<dyn NowipApi>, domains: Arc<DomainStore>) -> Self {
        let (state, _) = watch::channel(AccountState::default());
        Self { api, domains, state, fetch_lock: Mutex::new(()), epoch: AtomicU64::new(0) }
    }

    /// Live handle on the account.
    pub fn subscribe(&self) -> watch::Receiver<AccountState> {
        self.state.subscribe()
    }

    /// Current account record.
    pub fn account(&self) -> Account {
        self.state.borrow().account.clone()
    }

    /// Current load status.
    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status.clone()
    }

    /// Current account and status together.
    pub fn snapshot(&self) -> AccountState {
        self.state.borrow().clone()
    }

    /// Domain store refreshed alongside the account.
    pub fn domains(&self) -> &Arc<DomainStore> {
        &self.domains
    }

    /// The account, fetched first if it has not been loaded.
    ///
    /// A failed fetch leaves the account unloaded; callers inspect
    /// [`AccountStore::status`] when they need the reason.
    pub async fn use_account(&self) -> Account {
        if let Some(account) = self.loaded_account() {
            return account;
        }

        let _guard = self.fetch_lock.lock().await;
        // A concurrent caller may have finished the fetch while we waited.
        if let Some(account) = self.loaded_account() {
            return account;
        }

        self.fetch_locked().await;
        self.account()
    }

    /// Merge `account` into the current record.
    ///
    /// Fields present in `account` overwrite; absent fields keep their value.
    pub fn set(&self, account: Account) {
        self.state.send_modify(|state| {
            state.account.merge(account);
            if state.account.is_loaded() {
                state.status = LoadStatus::Loaded;
            }
        });
    }

    /// Fetch the account, merge it in and refresh the domain list.
    ///
    /// A failed account fetch leaves both the account and the domain list
    /// untouched.
    pub async fn fetch_and_set(&self) -> LoadStatus {
        let _guard = self.fetch_lock.lock().await;
        self.fetch_locked().await
    }

    /// Drop the account and the domain list.
    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.state.send_modify(|state| {
            state.account.clear();
            state.status = LoadStatus::Unloaded;
        });
        self.domains.clear();
        debug!("account store cleared");
    }

    fn loaded_account(&self) -> Option<Account> {
        let state = self.state.borrow();
        state.account.is_loaded().then(|| state.account.clone())
    }

    async fn fetch_locked(&self) -> LoadStatus {
        let epoch = self.epoch.load(Ordering::Acquire);
        self.state.send_modify(|state| state.status = LoadStatus::Loading);

        let fetched = self.api.get_account().await.and_then(|account| {
            if account.is_loaded() {
                Ok(account)
            } else {
                Err(NowipError::Api("account response has no id".to_string()))
            }
        });

        match fetched {
            Ok(account) => {
                let account_id = account.id;
                let applied = self.state.send_if_modified(|state| {
                    if self.epoch.load(Ordering::Acquire) != epoch {
                        return false;
                    }
                    state.account.merge(account);
                    state.status = LoadStatus::Loaded;
                    true
                });

                if !applied {
                    debug!("discarding account fetched before clear");
                    return LoadStatus::Unloaded;
                }

                info!(account_id, "account loaded");
                self.domains.fetch_and_set().await;
                LoadStatus::Loaded
            }
            Err(err) => {
                warn!(error = %err, kind = err.label(), "failed to fetch account");
                let failed = LoadStatus::Failed(err);
                self.state.send_if_modified(|state| {
                    if self.epoch.load(Ordering::Acquire) != epoch {
                        return false;
                    }
                    state.status = failed.clone();
                    true
                });
                failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nowip_domain::Domain;
    use serde_json::json;

    use super::*;
    use crate::testing::MockApiClient;

    fn stores(api: &Arc<MockApiClient>) -> AccountStore {
        let domains = Arc::new(DomainStore::new(api.clone()));
        AccountStore::new(api.clone(), domains)
    }

    fn alice() -> Account {
        Account { id: Some(1), username: Some("alice".into()), ..Account::default() }
    }

    #[tokio::test]
    async fn fetch_loads_account_and_domains() {
        let api = Arc::new(MockApiClient::new());
        api.set_account(alice());
        api.set_domains(vec![Domain::new(10, "home"), Domain::new(11, "work")]);
        let store = stores(&api);

        assert_eq!(store.fetch_and_set().await, LoadStatus::Loaded);
        assert_eq!(store.account().id, Some(1));
        assert_eq!(store.domains().subscribe().borrow().ids(), vec![10, 11]);
        assert_eq!(api.get_domains_calls(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_domains_alone() {
        let api = Arc::new(MockApiClient::new());
        api.fail_account(NowipError::Auth("expired".into()));
        let store = stores(&api);
        store.domains().set(vec![Domain::new(3, "kept")]);

        let status = store.fetch_and_set().await;

        assert_eq!(status.error(), Some(&NowipError::Auth("expired".into())));
        assert!(!store.account().is_loaded());
        assert_eq!(store.domains().domains().len(), 1);
        assert_eq!(api.get_domains_calls(), 0);
    }

    #[tokio::test]
    async fn response_without_id_is_a_failure() {
        let api = Arc::new(MockApiClient::new());
        api.set_account(Account { username: Some("ghost".into()), ..Account::default() });
        let store = stores(&api);

        assert!(store.fetch_and_set().await.is_failed());
        assert!(!store.account().is_loaded());
        assert_eq!(api.get_domains_calls(), 0);
    }

    #[tokio::test]
    async fn use_account_fetches_only_when_unloaded() {
        let api = Arc::new(MockApiClient::new());
        api.set_account(alice());
        let store = stores(&api);

        assert_eq!(store.use_account().await.id, Some(1));
        assert_eq!(store.use_account().await.id, Some(1));
        assert_eq!(api.get_account_calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_use_account_issues_one_request() {
        let api = Arc::new(MockApiClient::new());
        api.set_account(alice());
        api.set_latency(Duration::from_millis(20));
        let store = stores(&api);

        let (a, b) = tokio::join!(store.use_account(), store.use_account());

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(1));
        assert_eq!(api.get_account_calls(), 1);
    }

    #[tokio::test]
    async fn set_merges_fields() {
        let api = Arc::new(MockApiClient::new());
        let store = stores(&api);
        store.set(alice());

        let mut patch = Account { email: Some("alice@example.test".into()), ..Account::default() };
        patch.extra.insert("plan".into(), json!("free"));
        store.set(patch);

        let account = store.account();
        assert_eq!(account.username.as_deref(), Some("alice"));
        assert_eq!(account.email.as_deref(), Some("alice@example.test"));
        assert_eq!(account.extra["plan"], json!("free"));
        assert!(store.status().is_loaded());
    }

    #[tokio::test]
    async fn clear_empties_account_and_domains() {
        let api = Arc::new(MockApiClient::new());
        api.set_account(alice());
        api.set_domains(vec![Domain::new(10, "home")]);
        let store = stores(&api);
        let mut handle = store.subscribe();
        store.fetch_and_set().await;

        store.clear();

        assert!(!handle.borrow_and_update().account.is_loaded());
        assert_eq!(store.status(), LoadStatus::Unloaded);
        assert!(store.domains().domains().is_empty());
    }

    #[tokio::test]
    async fn fetch_finishing_after_clear_is_discarded() {
        let api = Arc::new(MockApiClient::new());
        api.set_account(alice());
        api.set_latency(Duration::from_millis(20));
        let store = stores(&api);

        let (status, ()) = tokio::join!(store.fetch_and_set(), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            store.clear();
        });

        assert_eq!(status, LoadStatus::Unloaded);
        assert!(!store.account().is_loaded());
        assert_eq!(api.get_domains_calls(), 0);
    }
}
