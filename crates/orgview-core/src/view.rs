// ── Aggregate view types ──
//
// One field per consulted source. A failed source is recorded as
// `unavailable`, never as an empty list.

use serde::{Deserialize, Serialize};

use orgview_api::{FailureKind, FetchOutcome, OrganizationId, Site, User};

/// Outcome of one source, as presented in the view.
///
/// Serializes as `{"status": "succeeded", "data": [...]}` or
/// `{"status": "unavailable", "kind": "transport", "reason": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceResult<T> {
    Succeeded { data: Vec<T> },
    Unavailable { kind: FailureKind, reason: String },
}

impl<T> SourceResult<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// The data, or `None` if the source was unavailable.
    pub fn data(&self) -> Option<&[T]> {
        match self {
            Self::Succeeded { data } => Some(data),
            Self::Unavailable { .. } => None,
        }
    }

    /// The data, or an empty slice if the source was unavailable.
    pub fn data_or_empty(&self) -> &[T] {
        self.data().unwrap_or_default()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Unavailable { kind, .. } => Some(*kind),
        }
    }
}

impl<T> From<FetchOutcome<T>> for SourceResult<T> {
    fn from(outcome: FetchOutcome<T>) -> Self {
        match outcome {
            FetchOutcome::Succeeded(data) => Self::Succeeded { data },
            FetchOutcome::Unavailable(u) => Self::Unavailable {
                kind: u.kind,
                reason: u.reason,
            },
        }
    }
}

/// Which site endpoint fed the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteDetail {
    /// Plain site listing; `Site::users` is not populated.
    #[default]
    Plain,
    /// Enriched listing; each site carries its users.
    WithUsers,
}

/// Everything the collaborating services hold for one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationView {
    pub organization_id: OrganizationId,
    pub site_detail: SiteDetail,
    pub sites: SourceResult<Site>,
    pub users: SourceResult<User>,
}

impl OrganizationView {
    /// `true` when every source answered.
    pub fn is_complete(&self) -> bool {
        self.sites.is_succeeded() && self.users.is_succeeded()
    }

    /// Names of the fields whose source was unavailable.
    pub fn unavailable_sources(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.sites.is_unavailable() {
            names.push("sites");
        }
        if self.users.is_unavailable() {
            names.push("users");
        }
        names
    }

    /// Sites, flattened to empty when the site service was unavailable.
    pub fn sites_or_empty(&self) -> &[Site] {
        self.sites.data_or_empty()
    }

    /// Users, flattened to empty when the user service was unavailable.
    pub fn users_or_empty(&self) -> &[User] {
        self.users.data_or_empty()
    }
}
