//! Settings resolution: config file + environment, then CLI flag overrides.

use std::path::PathBuf;

use orgview_config::{Settings, config_path, load_settings_from};
use orgview_core::AggregatorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file in effect: `--config` / `ORGVIEW_CONFIG`, else the default.
pub fn effective_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load settings and layer the global flags on top.
pub fn resolve_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = effective_path(global);
    let mut settings = load_settings_from(&path).map_err(|source| CliError::Config {
        path: path.display().to_string(),
        source,
    })?;
    apply_overrides(&mut settings, global);
    Ok(settings)
}

/// Resolve settings and validate them into the runtime aggregator config.
pub fn resolve_aggregator_config(global: &GlobalOpts) -> Result<AggregatorConfig, CliError> {
    resolve_settings(global)?
        .into_aggregator_config()
        .map_err(|source| CliError::Config {
            path: effective_path(global).display().to_string(),
            source,
        })
}

fn apply_overrides(settings: &mut Settings, global: &GlobalOpts) {
    if let Some(ref url) = global.site_service {
        settings.site_service.url.clone_from(url);
    }
    if let Some(ref url) = global.user_service {
        settings.user_service.url.clone_from(url);
    }
    if let Some(secs) = global.timeout {
        settings.http.timeout_secs = secs;
    }
    if let Some(secs) = global.connect_timeout {
        settings.http.connect_timeout_secs = secs;
    }
    if global.retry {
        settings.retry.enabled = true;
    }
}

/// Copy of `settings` safe to print.
pub fn redacted(settings: &Settings) -> Settings {
    let mut shown = settings.clone();
    for service in [&mut shown.site_service, &mut shown.user_service] {
        if service.token.is_some() {
            service.token = Some("********".into());
        }
    }
    shown
}
