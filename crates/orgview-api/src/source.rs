use std::future::Future;

use crate::models::OrganizationId;
use crate::outcome::FetchOutcome;

/// A remote service that can list its entities for one organization.
///
/// Implementations perform one read (plus any retry their policy allows)
/// and always resolve to a [`FetchOutcome`]; they never return an error.
pub trait OrganizationSource: Send + Sync {
    type Entity: Send;

    /// Short name of the source, used in logs and unavailability reports.
    fn name(&self) -> &'static str;

    fn fetch_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> impl Future<Output = FetchOutcome<Self::Entity>> + Send;
}
