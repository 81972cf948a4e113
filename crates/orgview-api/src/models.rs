// Remote entity projections
//
// Read-only mirrors of the records owned by the site and user services.
// Optional fields use `#[serde(default)]` because the services omit or null
// them freely; anything we don't model lands in `extra` so nothing is lost
// when the aggregate is re-serialized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidOrganizationId;

// ── Organization identifier ──────────────────────────────────────────

/// A validated organization identifier.
///
/// Always strictly positive. Clients only accept this type, so a zero,
/// negative, or missing identifier is rejected before any request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct OrganizationId(i64);

impl OrganizationId {
    /// Returns `None` unless `raw` is strictly positive.
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for OrganizationId {
    type Error = InvalidOrganizationId;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| InvalidOrganizationId {
            value: raw.to_string(),
        })
    }
}

impl From<OrganizationId> for i64 {
    fn from(id: OrganizationId) -> Self {
        id.0
    }
}

impl FromStr for OrganizationId {
    type Err = InvalidOrganizationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidOrganizationId {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Site ─────────────────────────────────────────────────────────────

/// Site record from `api/sites/organization/{id}`.
///
/// `users` is only populated by the `with-users` endpoint; the plain
/// endpoint leaves it `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: i64,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    /// Catch-all for fields this projection doesn't model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Site {
    /// Nested users, or an empty slice when none were embedded.
    pub fn users(&self) -> &[User] {
        self.users.as_deref().unwrap_or_default()
    }
}

// ── User ─────────────────────────────────────────────────────────────

/// User record from `api/users/organization/{id}` (or nested in a site).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<i64>,
    /// Catch-all for fields this projection doesn't model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
