// Generic read client for one remote service
//
// Wraps `reqwest::Client` with organization-scoped URL construction, JSON
// list decoding, and failure normalization. The per-service clients
// (`SiteClient`, `UserClient`) are thin typed wrappers over this one.

use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::OrganizationId;
use crate::outcome::{FetchOutcome, Unavailable};
use crate::retry::RetryPolicy;
use crate::transport::TransportConfig;

/// Placeholder substituted with the organization id in path templates.
pub const ORGANIZATION_ID_PLACEHOLDER: &str = "{organizationId}";

/// Raw HTTP client for one named remote service.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference-counted, so
/// clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    service: &'static str,
    base_url: Url,
    token: Option<SecretString>,
    retry: RetryPolicy,
}

impl ServiceClient {
    /// Create a client with its own connection pool built from `transport`.
    pub fn new(
        service: &'static str,
        base_url: Url,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, service, base_url))
    }

    /// Create a client over a pre-built (usually shared) `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, service: &'static str, base_url: Url) -> Self {
        Self {
            http,
            service,
            base_url,
            token: None,
            retry: RetryPolicy::Never,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Name of the remote service, used in logs.
    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{template}` with the organization id interpolated.
    pub fn organization_url(
        &self,
        template: &str,
        organization_id: OrganizationId,
    ) -> Result<Url, Error> {
        let path = template.replace(ORGANIZATION_ID_PLACEHOLDER, &organization_id.to_string());
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one GET and decode a JSON array body.
    ///
    /// A `null` body, a blank body, or `204 No Content` decode to an empty
    /// list: the service answered, it just had nothing.
    pub async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        debug!(service = self.service, %url, "GET");

        let mut request = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let resp = request.send().await?;
        let status = resp.status();

        // The host answered; a body that fails to arrive doesn't change that.
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let body = resp.text().await?;

        if status == reqwest::StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items: Option<Vec<T>> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;
        Ok(items.unwrap_or_default())
    }

    /// Fetch the list behind `template` for one organization, never failing.
    ///
    /// Any error is logged and folded into [`FetchOutcome::Unavailable`].
    /// Transport failures are retried only when the retry policy allows it.
    pub async fn fetch_organization<T>(
        &self,
        template: &str,
        organization_id: OrganizationId,
    ) -> FetchOutcome<T>
    where
        T: DeserializeOwned + Send,
    {
        let url = match self.organization_url(template, organization_id) {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    service = self.service,
                    organization_id = %organization_id,
                    kind = %e.kind(),
                    error = %e,
                    "could not build request URL, source unavailable"
                );
                return FetchOutcome::Unavailable(Unavailable::from(&e));
            }
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.get_list::<T>(url.clone()).await {
                Ok(items) => {
                    debug!(
                        service = self.service,
                        organization_id = %organization_id,
                        count = items.len(),
                        attempts,
                        "source answered"
                    );
                    return FetchOutcome::Succeeded(items);
                }
                Err(e) if self.retry.should_retry(attempts, &e) => {
                    let delay = self.retry.next_delay();
                    warn!(
                        service = self.service,
                        %url,
                        kind = %e.kind(),
                        error = %e,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "transport failure, retrying once"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(
                        service = self.service,
                        %url,
                        kind = %e.kind(),
                        status = e.status(),
                        error = %e,
                        attempts,
                        "source unavailable"
                    );
                    return FetchOutcome::Unavailable(Unavailable::from(&e));
                }
            }
        }
    }
}
