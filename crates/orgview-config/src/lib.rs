//! Configuration for the orgview aggregator.
//!
//! TOML settings file, `ORGVIEW_`-prefixed environment overrides, token
//! resolution, and translation to `orgview_core::AggregatorConfig`. The CLI
//! layers its flag overrides on top of [`Settings`] before converting.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use orgview_core::{AggregatorConfig, RetryPolicy, ServiceEndpoint};

pub const ENV_PREFIX: &str = "ORGVIEW_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_site_service")]
    pub site_service: ServiceSettings,

    #[serde(default = "default_user_service")]
    pub user_service: ServiceSettings,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_service: default_site_service(),
            user_service: default_user_service(),
            http: HttpSettings::default(),
            retry: RetrySettings::default(),
        }
    }
}

/// Where one remote service lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceSettings {
    /// Base URL (e.g., "http://site:8082").
    pub url: String,

    /// Bearer token in plaintext. Prefer `token_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable name containing the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

impl ServiceSettings {
    fn at(url: &str) -> Self {
        Self {
            url: url.into(),
            token: None,
            token_env: None,
        }
    }
}

fn default_site_service() -> ServiceSettings {
    ServiceSettings::at("http://site:8082")
}
fn default_user_service() -> ServiceSettings {
    ServiceSettings::at("http://user:8081")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_connect_timeout_secs() -> u64 {
    3
}

/// Single bounded retry for transport failures. Disabled unless asked for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetrySettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_delay_ms: default_base_delay_ms(),
            max_jitter_ms: default_max_jitter_ms(),
        }
    }
}

fn default_base_delay_ms() -> u64 {
    100
}
fn default_max_jitter_ms() -> u64 {
    100
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "orgview", "orgview").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("orgview");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load settings from the default path + environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings from `path` (missing file is fine) + environment.
///
/// Environment keys nest with a double underscore:
/// `ORGVIEW_HTTP__TIMEOUT_SECS=5` sets `http.timeout_secs`.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

// ── Translation to runtime config ───────────────────────────────────

impl Settings {
    /// Validate and convert into the core runtime configuration.
    pub fn into_aggregator_config(self) -> Result<AggregatorConfig, ConfigError> {
        let site_service = resolve_endpoint("site_service", &self.site_service)?;
        let user_service = resolve_endpoint("user_service", &self.user_service)?;

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "http.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "http.connect_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }

        let mut config = AggregatorConfig::new(site_service.url.clone(), user_service.url.clone());
        config.site_service = site_service;
        config.user_service = user_service;
        config.timeout = Duration::from_secs(self.http.timeout_secs);
        config.connect_timeout = Duration::from_secs(self.http.connect_timeout_secs);
        if let Some(user_agent) = self.http.user_agent {
            config.user_agent = user_agent;
        }
        config.retry = if self.retry.enabled {
            RetryPolicy::once_on_transport(
                Duration::from_millis(self.retry.base_delay_ms),
                Duration::from_millis(self.retry.max_jitter_ms),
            )
        } else {
            RetryPolicy::Never
        };

        Ok(config)
    }
}

fn resolve_endpoint(field: &str, service: &ServiceSettings) -> Result<ServiceEndpoint, ConfigError> {
    let url = Url::parse(&service.url).map_err(|e| ConfigError::Validation {
        field: format!("{field}.url"),
        reason: format!("invalid URL '{}': {e}", service.url),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: format!("{field}.url"),
            reason: format!("expected an http or https URL, got '{}'", service.url),
        });
    }

    Ok(ServiceEndpoint {
        url,
        token: resolve_token(service),
    })
}

/// Token from the named env var first, then the plaintext value.
fn resolve_token(service: &ServiceSettings) -> Option<SecretString> {
    if let Some(ref env_name) = service.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }
    service.token.clone().map(SecretString::from)
}
