// ── Aggregator ──
//
// Consults the site and user services for one organization and merges
// their outcomes by field. Sub-calls run concurrently and share nothing;
// each resolves on its own to succeeded or unavailable.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use orgview_api::{
    FetchOutcome, OrganizationId, OrganizationSource, ServiceClient, Site, SiteClient,
    Unavailable, User, UserClient,
};

use crate::config::AggregatorConfig;
use crate::error::CoreError;
use crate::view::{OrganizationView, SiteDetail, SourceResult};

/// Builds organization views from the site and user services.
///
/// Cheap to clone: both clients share one reference-counted connection pool.
#[derive(Debug, Clone)]
pub struct Aggregator {
    sites: SiteClient,
    users: UserClient,
}

impl Aggregator {
    pub fn new(sites: SiteClient, users: UserClient) -> Self {
        Self { sites, users }
    }

    /// Build both clients over a single shared HTTP client.
    pub fn from_config(config: &AggregatorConfig) -> Result<Self, CoreError> {
        if config.timeout.is_zero() || config.connect_timeout.is_zero() {
            return Err(CoreError::Config {
                message: "timeouts must be greater than zero".into(),
            });
        }

        let http = config
            .transport()
            .build_client()
            .map_err(|source| CoreError::HttpClient { source })?;

        let sites = ServiceClient::with_client(
            http.clone(),
            SiteClient::SERVICE,
            config.site_service.url.clone(),
        )
        .with_token(config.site_service.token.clone())
        .with_retry(config.retry);

        let users = ServiceClient::with_client(
            http,
            UserClient::SERVICE,
            config.user_service.url.clone(),
        )
        .with_token(config.user_service.token.clone())
        .with_retry(config.retry);

        debug!(
            site_service = %config.site_service.url,
            user_service = %config.user_service.url,
            timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX),
            retry = ?config.retry,
            "aggregator configured"
        );

        Ok(Self::new(
            SiteClient::from_service_client(sites),
            UserClient::from_service_client(users),
        ))
    }

    pub fn sites(&self) -> &SiteClient {
        &self.sites
    }

    pub fn users(&self) -> &UserClient {
        &self.users
    }

    // ── Views ────────────────────────────────────────────────────────

    /// Sites and users for an organization.
    ///
    /// Only an invalid identifier is an error. Remote failures show up as
    /// `unavailable` fields of the returned view.
    pub async fn get_organization_view(
        &self,
        organization_id: i64,
    ) -> Result<OrganizationView, CoreError> {
        self.get_organization_view_cancellable(
            organization_id,
            SiteDetail::Plain,
            &CancellationToken::new(),
        )
        .await
    }

    /// Like [`get_organization_view`](Self::get_organization_view), but sites
    /// come from the `with-users` endpoint and carry their users.
    pub async fn get_organization_view_with_site_users(
        &self,
        organization_id: i64,
    ) -> Result<OrganizationView, CoreError> {
        self.get_organization_view_cancellable(
            organization_id,
            SiteDetail::WithUsers,
            &CancellationToken::new(),
        )
        .await
    }

    /// Build a view, abandoning pending sub-calls if `cancel` fires.
    ///
    /// Sub-calls that already finished keep their result; the rest are
    /// reported as `unavailable` with kind `cancelled`.
    pub async fn get_organization_view_cancellable(
        &self,
        organization_id: i64,
        detail: SiteDetail,
        cancel: &CancellationToken,
    ) -> Result<OrganizationView, CoreError> {
        let organization_id = OrganizationId::try_from(organization_id)?;
        Ok(self.assemble(organization_id, detail, cancel).await)
    }

    // ── Single sources ───────────────────────────────────────────────

    /// The site service's answer alone, abandoned if `cancel` fires.
    pub async fn get_sites_cancellable(
        &self,
        organization_id: i64,
        detail: SiteDetail,
        cancel: &CancellationToken,
    ) -> Result<SourceResult<Site>, CoreError> {
        let organization_id = OrganizationId::try_from(organization_id)?;
        let outcome = match detail {
            SiteDetail::Plain => consult(&self.sites, organization_id, cancel).await,
            SiteDetail::WithUsers => {
                consult(&self.sites.with_users(), organization_id, cancel).await
            }
        };
        Ok(outcome.into())
    }

    /// The user service's answer alone, abandoned if `cancel` fires.
    pub async fn get_users_cancellable(
        &self,
        organization_id: i64,
        cancel: &CancellationToken,
    ) -> Result<SourceResult<User>, CoreError> {
        let organization_id = OrganizationId::try_from(organization_id)?;
        Ok(consult(&self.users, organization_id, cancel).await.into())
    }

    async fn assemble(
        &self,
        organization_id: OrganizationId,
        detail: SiteDetail,
        cancel: &CancellationToken,
    ) -> OrganizationView {
        let (sites, users) = match detail {
            SiteDetail::Plain => tokio::join!(
                consult(&self.sites, organization_id, cancel),
                consult(&self.users, organization_id, cancel),
            ),
            SiteDetail::WithUsers => {
                let enriched = self.sites.with_users();
                tokio::join!(
                    consult(&enriched, organization_id, cancel),
                    consult(&self.users, organization_id, cancel),
                )
            }
        };

        let view = OrganizationView {
            organization_id,
            site_detail: detail,
            sites: sites.into(),
            users: users.into(),
        };

        info!(
            organization_id = %organization_id,
            site_detail = ?detail,
            sites = view.sites.data().map(<[_]>::len),
            users = view.users.data().map(<[_]>::len),
            unavailable = ?view.unavailable_sources(),
            "organization view assembled"
        );

        view
    }
}

/// Run one source's fetch unless the caller cancels first.
async fn consult<S: OrganizationSource>(
    source: &S,
    organization_id: OrganizationId,
    cancel: &CancellationToken,
) -> FetchOutcome<S::Entity> {
    tokio::select! {
        biased;

        () = cancel.cancelled() => {
            warn!(
                source = source.name(),
                organization_id = %organization_id,
                "cancelled before the source answered"
            );
            FetchOutcome::Unavailable(Unavailable::cancelled())
        }
        outcome = source.fetch_by_organization(organization_id) => outcome,
    }
}
