use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the `orgview-api` crate.
///
/// Returned only by the strict, single-attempt calls
/// ([`ServiceClient::get_list`](crate::ServiceClient::get_list)). The
/// organization-scoped fetches fold every variant into a
/// [`FetchOutcome::Unavailable`](crate::FetchOutcome::Unavailable) via
/// [`Error::kind`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction failed for the target endpoint.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The shared HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The remote host answered, but not with a 2xx status.
    #[error("{url} answered with HTTP {status}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Classify this error into the coarse taxonomy reported to callers.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(e) if e.is_decode() => FailureKind::Decode,
            Self::Transport(_) | Self::InvalidUrl(_) | Self::ClientBuild(_) => {
                FailureKind::Transport
            }
            Self::Status { .. } => FailureKind::Protocol,
            Self::Deserialization { .. } => FailureKind::Decode,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Only connect failures and timeouts qualify. Anything else means the
    /// host was reached: an error status, a malformed HTTP response, or a
    /// broken body will not improve on a second attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the request exceeded its connect or total timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// The HTTP status returned by the remote host, if it answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Why a source produced no data.
///
/// Every [`Error`] maps onto one of the first three kinds; `Cancelled` is
/// produced by callers that abort a pending fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The remote host could not be reached or did not respond in time.
    Transport,
    /// The remote host answered with a non-success HTTP status.
    Protocol,
    /// The response body did not match the expected entity shape.
    Decode,
    /// The caller gave up before the source answered.
    Cancelled,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Decode => "decode",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw organization identifier that is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("organization id must be a positive integer, got '{value}'")]
pub struct InvalidOrganizationId {
    pub value: String,
}
