// User service endpoints

use url::Url;

use crate::client::ServiceClient;
use crate::error::Error;
use crate::models::{OrganizationId, User};
use crate::outcome::FetchOutcome;
use crate::source::OrganizationSource;
use crate::transport::TransportConfig;

pub const USERS_BY_ORGANIZATION: &str = "api/users/organization/{organizationId}";

/// Client for the user service.
#[derive(Debug, Clone)]
pub struct UserClient {
    inner: ServiceClient,
}

impl UserClient {
    pub const SERVICE: &'static str = "user";

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

    /// Users belonging to an organization.
    ///
    /// `GET api/users/organization/{organizationId}`
    pub async fn find_by_organization(&self, organization_id: OrganizationId) -> FetchOutcome<User> {
        self.inner
            .fetch_organization(USERS_BY_ORGANIZATION, organization_id)
            .await
    }
}

impl OrganizationSource for UserClient {
    type Entity = User;

    fn name(&self) -> &'static str {
        Self::SERVICE
    }

    async fn fetch_by_organization(&self, organization_id: OrganizationId) -> FetchOutcome<User> {
        self.find_by_organization(organization_id).await
    }
}
