//! Shared fixtures for `nowip-core` integration tests.

use std::sync::Arc;

use nowip_core::testing::{MemoryTokenStore, MockApiClient};
use nowip_core::{Session, SessionToken};
use nowip_domain::{Account, Domain};

pub struct TestSession {
    pub api: Arc<MockApiClient>,
    pub tokens: Arc<MemoryTokenStore>,
    pub session: Session,
}

/// Session whose API knows account 42 owning domains 1 and 2.
pub fn signed_in(token: &str) -> TestSession {
    build(SessionToken::new(token))
}

pub fn signed_out() -> TestSession {
    build(None)
}

fn build(token: Option<SessionToken>) -> TestSession {
    let api = Arc::new(MockApiClient::new());
    api.set_account(Account {
        id: Some(42),
        username: Some("dana".into()),
        ..Account::default()
    });
    api.set_domains(vec![Domain::new(1, "home"), Domain::new(2, "lab")]);
    api.add_lookup(Domain::new(3, "office"));

    let tokens = Arc::new(MemoryTokenStore::new(token));
    let session = Session::new(api.clone(), tokens.clone());
    TestSession { api, tokens, session }
}
