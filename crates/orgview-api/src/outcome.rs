// Client-boundary result type
//
// `FetchOutcome` keeps "the service answered with nothing" and "the service
// could not be asked" apart. Callers flatten it however they like; the
// distinction is never lost here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, FailureKind};

/// Marker for a source that produced no data, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unavailable {
    pub kind: FailureKind,
    pub reason: String,
}

impl Unavailable {
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// The marker recorded for a fetch abandoned by its caller.
    pub fn cancelled() -> Self {
        Self::new(
            FailureKind::Cancelled,
            "request cancelled before the source answered",
        )
    }
}

impl From<&Error> for Unavailable {
    fn from(err: &Error) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Result of one organization-scoped fetch against one remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The service answered; the list may be empty.
    Succeeded(Vec<T>),
    /// No data was obtained from the service.
    Unavailable(Unavailable),
}

impl<T> FetchOutcome<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// The decoded items, or `None` if the source was unavailable.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Self::Succeeded(items) => Some(items),
            Self::Unavailable(_) => None,
        }
    }

    /// The failure marker, if the source was unavailable.
    pub fn unavailable(&self) -> Option<&Unavailable> {
        match self {
            Self::Succeeded(_) => None,
            Self::Unavailable(u) => Some(u),
        }
    }

    pub fn into_result(self) -> Result<Vec<T>, Unavailable> {
        match self {
            Self::Succeeded(items) => Ok(items),
            Self::Unavailable(u) => Err(u),
        }
    }

    /// Flatten to the lossy "empty on failure" shape.
    pub fn unwrap_or_empty(self) -> Vec<T> {
        match self {
            Self::Succeeded(items) => items,
            Self::Unavailable(_) => Vec::new(),
        }
    }
}

impl<T> From<Result<Vec<T>, Error>> for FetchOutcome<T> {
    fn from(result: Result<Vec<T>, Error>) -> Self {
        match result {
            Ok(items) => Self::Succeeded(items),
            Err(e) => Self::Unavailable(Unavailable::from(&e)),
        }
    }
}
