// ── Core error types ──
//
// Remote-service failures are NOT errors here: they become `unavailable`
// fields of the view. What remains are the things the caller got wrong
// before any request was made.

use thiserror::Error;

use orgview_api::InvalidOrganizationId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid organization id: {value}")]
    InvalidOrganizationId { value: String },

    #[error("Could not build the HTTP client: {source}")]
    HttpClient {
        #[source]
        source: orgview_api::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<InvalidOrganizationId> for CoreError {
    fn from(err: InvalidOrganizationId) -> Self {
        CoreError::InvalidOrganizationId { value: err.value }
    }
}
