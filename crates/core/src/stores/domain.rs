//! Domain store: the signed-in user's domains
//!
//! Holds an ordered collection with unique ids. `get_by_id` is a
//! read-through cache: hits are served locally, misses fetch the domain and
//! append it. Concurrent misses for the same id share one request.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use nowip_domain::{parse_domain_id, Domain, DomainId, Result};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::LoadStatus;
use crate::api::NowipApi;

type SharedLookup = Shared<BoxFuture<'static, Result<Domain>>>;

/// Snapshot published to observers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainState {
    pub domains: Vec<Domain>,
    pub status: LoadStatus,
}

impl DomainState {
    /// Domain with `id`, if cached.
    pub fn get(&self, id: DomainId) -> Option<&Domain> {
        self.domains.iter().find(|domain| domain.id == id)
    }

    /// Ids in collection order.
    pub fn ids(&self) -> Vec<DomainId> {
        self.domains.iter().map(|domain| domain.id).collect()
    }
}

struct PendingLookup {
    seq: u64,
    /// Epoch the lookup started in; joiners inherit it.
    epoch: u64,
    lookup: SharedLookup,
}

/// Reactive cache of the user's domains
pub struct DomainStore {
    api: Arc<dyn NowipApi>,
    state: watch::Sender<DomainState>,
    pending: Mutex<HashMap<DomainId, PendingLookup>>,
    next_seq: AtomicU64,
    /// Bumped by `clear`; results of fetches started earlier are dropped.
    epoch: AtomicU64,
}

impl DomainStore {
    /// Create an empty store reading through `api`.
    pub fn new(api: Arc<dyn NowipApi>) -> Self {
        let (state, _) = watch::channel(DomainState::default());
        Self {
            api,
            state,
            pending: Mutex::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    /// Live handle on the collection.
    pub fn subscribe(&self) -> watch::Receiver<DomainState> {
        self.state.subscribe()
    }

    /// Current collection.
    pub fn domains(&self) -> Vec<Domain> {
        self.state.borrow().domains.clone()
    }

    /// Current load status.
    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status.clone()
    }

    /// Cached domain with `id`, without touching the network.
    pub fn find(&self, id: DomainId) -> Option<Domain> {
        self.state.borrow().get(id).cloned()
    }

    /// Replace the whole collection.
    ///
    /// Observers keep their handle and see the new contents in one update.
    /// Later duplicates of an id are dropped.
    pub fn set(&self, domains: Vec<Domain>) {
        let domains = dedup_by_id(domains);
        self.state.send_modify(|state| {
            state.domains = domains;
            state.status = LoadStatus::Loaded;
        });
    }

    /// Fetch the domain list and replace the collection with it.
    ///
    /// On failure the collection is left untouched and the error is reported
    /// through the returned status and the published state.
    pub async fn fetch_and_set(&self) -> LoadStatus {
        let epoch = self.epoch.load(Ordering::Acquire);
        self.state.send_modify(|state| state.status = LoadStatus::Loading);

        match self.api.get_domains().await {
            Ok(domains) => {
                let count = domains.len();
                let domains = dedup_by_id(domains);
                let applied = self.state.send_if_modified(|state| {
                    if self.epoch.load(Ordering::Acquire) != epoch {
                        return false;
                    }
                    state.domains = domains;
                    state.status = LoadStatus::Loaded;
                    true
                });

                if applied {
                    debug!(count, "domain list loaded");
                    LoadStatus::Loaded
                } else {
                    debug!("discarding domain list fetched before clear");
                    LoadStatus::Unloaded
                }
            }
            Err(err) => {
                warn!(error = %err, kind = err.label(), "failed to fetch domain list");
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

    /// Cached domain with `id`, fetching and caching it on a miss.
    ///
    /// Returns `None` when the fetch fails; the collection is unchanged then.
    pub async fn get_by_id(&self, id: DomainId) -> Option<Domain> {
        if let Some(domain) = self.find(id) {
            return Some(domain);
        }

        let (seq, lookup, epoch) = {
            let mut pending = self.pending.lock();
            // Another lookup may have landed while we waited for the lock.
            if let Some(domain) = self.find(id) {
                return Some(domain);
            }

            let entry = pending.entry(id).or_insert_with(|| {
                debug!(domain_id = id, "domain cache miss, fetching");
                let api = Arc::clone(&self.api);
                PendingLookup {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    epoch: self.epoch.load(Ordering::Acquire),
                    lookup: async move { api.get_domain(id).await }.boxed().shared(),
                }
            });
            (entry.seq, entry.lookup.clone(), entry.epoch)
        };

        let outcome = lookup.await;

        {
            let mut pending = self.pending.lock();
            if pending.get(&id).is_some_and(|entry| entry.seq == seq) {
                pending.remove(&id);
            }
        }

        match outcome {
            Ok(domain) => {
                if self.epoch.load(Ordering::Acquire) == epoch {
                    self.state.send_if_modified(|state| {
                        if state.get(domain.id).is_some() {
                            return false;
                        }
                        state.domains.push(domain.clone());
                        true
                    });
                }
                Some(domain)
            }
            Err(err) => {
                warn!(domain_id = id, error = %err, "failed to fetch domain");
                None
            }
        }
    }

    /// `get_by_id` for a raw route parameter.
    ///
    /// A parameter that is not a number can never match and yields `None`.
    pub async fn get_by_route_param(&self, raw: &str) -> Option<Domain> {
        match parse_domain_id(raw) {
            Ok(id) => self.get_by_id(id).await,
            Err(err) => {
                debug!(error = %err, "ignoring non-numeric domain id");
                None
            }
        }
    }

    /// Empty the collection and forget in-flight lookups.
    pub fn clear(&self) {
        {
            // Bumped under the lock so no lookup can join a stale entry.
            let mut pending = self.pending.lock();
            self.epoch.fetch_add(1, Ordering::AcqRel);
            pending.clear();
        }
        self.state.send_modify(|state| {
            state.domains.clear();
            state.status = LoadStatus::Unloaded;
        });
    }
}

fn dedup_by_id(domains: Vec<Domain>) -> Vec<Domain> {
    let mut seen = std::collections::HashSet::with_capacity(domains.len());
    domains.into_iter().filter(|domain| seen.insert(domain.id)).collect()
}
