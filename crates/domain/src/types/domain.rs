//! Domain (hostname registration) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::account::AccountId;
use crate::errors::{NowipError, Result};

/// Server-assigned domain identifier
pub type DomainId = u64;

/// A domain owned by the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    /// Name as registered; may or may not carry the base DNS zone suffix.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Domain {
    /// Minimal constructor, mostly useful for fixtures.
    pub fn new(id: DomainId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), owner_id: None, created_at: None, extra: Map::new() }
    }
}

/// Coerce a route parameter into a domain id.
///
/// # Errors
/// Returns `NowipError::InvalidInput` when `raw` is not a non-negative integer.
pub fn parse_domain_id(raw: &str) -> Result<DomainId> {
    raw.trim()
        .parse::<DomainId>()
        .map_err(|e| NowipError::InvalidInput(format!("invalid domain id {raw:?}: {e}")))
}

/// Append the base DNS zone to `name` unless it already ends with it.
///
/// `full_domain("home", "is-on.net")` is `home.is-on.net`, and
/// `full_domain("home.is-on.net", "is-on.net")` is returned unchanged.
pub fn full_domain(name: &str, base_domain: &str) -> String {
    let base = base_domain.trim_start_matches('.');
    if base.is_empty() {
        return name.to_string();
    }

    let suffix_start = name.len().checked_sub(base.len() + 1);
    let already_qualified = suffix_start.is_some_and(|start| {
        name.is_char_boundary(start)
            && name[start..].starts_with('.')
            && name[start + 1..].eq_ignore_ascii_case(base)
    });

    if already_qualified {
        name.to_string()
    } else {
        format!("{name}.{base}")
    }
}
