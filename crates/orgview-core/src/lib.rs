//! Organization view aggregation over independently owned services.
//!
//! This crate answers "everything related to organization X" by consulting
//! the site and user services through `orgview-api` and merging what they
//! return:
//!
//! - **[`Aggregator`]**: Holds one client per remote service (sharing one
//!   connection pool) and dispatches their fetches concurrently. One source
//!   failing never prevents or hides the others.
//!
//! - **[`OrganizationView`]**: The merged result. Each field is a
//!   [`SourceResult`]: `succeeded` with a (possibly empty) list, or
//!   `unavailable` with the failure kind. An outage degrades the view; it
//!   never fails the request.
//!
//! - **[`AggregatorConfig`]**: Runtime configuration (service endpoints,
//!   timeouts, retry policy). Built by the caller; core never reads files.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregator::Aggregator;
pub use config::{AggregatorConfig, ServiceEndpoint};
pub use error::CoreError;
pub use view::{OrganizationView, SiteDetail, SourceResult};

// Re-export the api types consumers need without depending on orgview-api.
pub use orgview_api::{
    FailureKind, FetchOutcome, OrganizationId, RetryPolicy, Site, Unavailable, User,
};
pub use tokio_util::sync::CancellationToken;
