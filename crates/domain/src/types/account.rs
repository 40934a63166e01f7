//! Account types
//!
//! The account record mirrors whatever `GET /account` returns. Only `id` has
//! meaning to the stores: it doubles as the "loaded" sentinel.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-assigned account identifier
pub type AccountId = u64;

/// Signed-in user's account record
///
/// Unknown fields are kept in `extra` so that newer API versions round-trip
/// without a code change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// An account without an id has not been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.id.is_some()
    }

    /// Copy every field present in `other` onto `self`.
    ///
    /// Fields absent from `other` keep their current value, matching a
    /// key-by-key assignment.
    pub fn merge(&mut self, other: Account) {
        let Account { id, username, display_name, email, role, extra } = other;

        if id.is_some() {
            self.id = id;
        }
        if username.is_some() {
            self.username = username;
        }
        if display_name.is_some() {
            self.display_name = display_name;
        }
        if email.is_some() {
            self.email = email;
        }
        if role.is_some() {
            self.role = role;
        }
        for (key, value) in extra {
            self.extra.insert(key, value);
        }
    }

    /// Drop every field, returning to the unloaded state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
