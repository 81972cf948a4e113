// orgview-api: Async Rust clients for the site and user services
//
// Every client here answers one question -- "what does this service hold for
// organization X?" -- and never lets a remote failure escape as an error.
// Outcomes are `FetchOutcome<T>`: either the decoded (possibly empty) list or
// an explicit `Unavailable` marker carrying the failure kind.

pub mod client;
pub mod error;
pub mod models;
pub mod outcome;
pub mod retry;
pub mod site;
pub mod source;
pub mod transport;
pub mod user;

pub use client::ServiceClient;
pub use error::{Error, FailureKind, InvalidOrganizationId};
pub use models::{OrganizationId, Site, User};
pub use outcome::{FetchOutcome, Unavailable};
pub use retry::RetryPolicy;
pub use site::{SiteClient, SitesWithUsers};
pub use source::OrganizationSource;
pub use transport::TransportConfig;
pub use user::UserClient;
