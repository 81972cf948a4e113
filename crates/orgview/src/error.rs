//! CLI error types with miette diagnostics.
//!
//! A degraded view is not an error: unavailable services show up in the
//! output and the process still exits 0.

use miette::Diagnostic;
use thiserror::Error;

use orgview_config::ConfigError;
use orgview_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────

    #[error("Invalid organization id: {value}")]
    #[diagnostic(
        code(orgview::invalid_organization_id),
        help("Organization ids are positive integers, e.g. `orgview view 42`.")
    )]
    InvalidOrganizationId { value: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Invalid configuration")]
    #[diagnostic(
        code(orgview::config),
        help(
            "Check the config file at {path}\n\
             and any ORGVIEW_* environment variables."
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("Could not set up the service clients")]
    #[diagnostic(code(orgview::setup))]
    Setup {
        #[source]
        source: CoreError,
    },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {message}")]
    #[diagnostic(code(orgview::render))]
    Render { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidOrganizationId { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidOrganizationId { value } => Self::InvalidOrganizationId { value },
            other => Self::Setup { source: other },
        }
    }
}
