// ── Runtime aggregation configuration ──
//
// These types describe *where* the collaborating services live and *how*
// to call them. They never touch disk: the CLI (via orgview-config) builds
// an `AggregatorConfig` and hands it in.

use std::time::Duration;

use orgview_api::{RetryPolicy, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// Address and credentials for one remote service.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    /// Service base URL (e.g., `http://site:8082`).
    pub url: Url,
    /// Bearer token sent with every request, if the service requires one.
    pub token: Option<SecretString>,
}

impl ServiceEndpoint {
    pub fn new(url: Url) -> Self {
        Self { url, token: None }
    }
}

/// Configuration for an [`Aggregator`](crate::Aggregator).
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub site_service: ServiceEndpoint,
    pub user_service: ServiceEndpoint,
    /// Total per-request timeout.
    pub timeout: Duration,
    /// Per-request connect timeout.
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Retry policy applied to every source. Off by default.
    pub retry: RetryPolicy,
}

impl AggregatorConfig {
    /// Configuration with default transport settings and no retry.
    pub fn new(site_url: Url, user_url: Url) -> Self {
        let transport = TransportConfig::default();
        Self {
            site_service: ServiceEndpoint::new(site_url),
            user_service: ServiceEndpoint::new(user_url),
            timeout: transport.timeout,
            connect_timeout: transport.connect_timeout,
            user_agent: transport.user_agent,
            retry: RetryPolicy::Never,
        }
    }

    /// Transport settings for the shared HTTP client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}
