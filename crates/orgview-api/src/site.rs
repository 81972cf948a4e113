// Site service endpoints
//
// Two read endpoints share one client: the plain listing and the
// `with-users` listing, which embeds each site's users.

use url::Url;

use crate::client::ServiceClient;
use crate::error::Error;
use crate::models::{OrganizationId, Site};
use crate::outcome::FetchOutcome;
use crate::source::OrganizationSource;
use crate::transport::TransportConfig;

pub const SITES_BY_ORGANIZATION: &str = "api/sites/organization/{organizationId}";
pub const SITES_WITH_USERS_BY_ORGANIZATION: &str =
    "api/sites/organization/{organizationId}/with-users";

/// Client for the site service.
#[derive(Debug, Clone)]
pub struct SiteClient {
    inner: ServiceClient,
}

impl SiteClient {
    pub const SERVICE: &'static str = "site";

    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            inner: ServiceClient::new(Self::SERVICE, base_url, transport)?,
        })
    }

    pub fn from_service_client(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub fn service_client(&self) -> &ServiceClient {
        &self.inner
    }

    /// Sites belonging to an organization, without nested users.
    ///
    /// `GET api/sites/organization/{organizationId}`
    pub async fn find_by_organization(&self, organization_id: OrganizationId) -> FetchOutcome<Site> {
        self.inner
            .fetch_organization(SITES_BY_ORGANIZATION, organization_id)
            .await
    }

    /// Sites belonging to an organization, each with its users embedded.
    ///
    /// `GET api/sites/organization/{organizationId}/with-users`
    pub async fn find_by_organization_with_users(
        &self,
        organization_id: OrganizationId,
    ) -> FetchOutcome<Site> {
        self.inner
            .fetch_organization(SITES_WITH_USERS_BY_ORGANIZATION, organization_id)
            .await
    }

    /// View of this client that answers through the `with-users` endpoint.
    pub fn with_users(&self) -> SitesWithUsers {
        SitesWithUsers {
            client: self.clone(),
        }
    }
}

impl OrganizationSource for SiteClient {
    type Entity = Site;

    fn name(&self) -> &'static str {
        Self::SERVICE
    }

    async fn fetch_by_organization(&self, organization_id: OrganizationId) -> FetchOutcome<Site> {
        self.find_by_organization(organization_id).await
    }
}

/// The site service's enriched listing, as its own source.
#[derive(Debug, Clone)]
pub struct SitesWithUsers {
    client: SiteClient,
}

impl OrganizationSource for SitesWithUsers {
    type Entity = Site;

    fn name(&self) -> &'static str {
        "site-with-users"
    }

    async fn fetch_by_organization(&self, organization_id: OrganizationId) -> FetchOutcome<Site> {
        self.client
            .find_by_organization_with_users(organization_id)
            .await
    }
}
