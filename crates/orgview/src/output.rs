//! Output formatting: table, JSON, YAML.
//!
//! Structured formats serialize the original data via serde. Tables use
//! `tabled` and spell out unavailable sources instead of showing them empty.

use std::io::{self, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use orgview_core::{OrganizationView, Site, SourceResult, User};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatcher ────────────────────────────────────────────────

/// Render `data` in the chosen format; `table_fn` handles `table`.
pub fn render<T>(
    format: OutputFormat,
    data: &T,
    table_fn: impl FnOnce(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(table_fn(data)),
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(render_err),
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(render_err),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(render_err),
    }
}

pub fn print_output(output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}

fn render_err(e: impl std::fmt::Display) -> CliError {
    CliError::Render {
        message: e.to_string(),
    }
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Users")]
    users: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            id: s.id,
            name: s.name.clone().unwrap_or_default(),
            address: s.address.clone().unwrap_or_default(),
            users: s
                .users
                .as_ref()
                .map_or_else(|| "-".to_owned(), |u| u.len().to_string()),
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Position")]
    position: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone().unwrap_or_default(),
            email: u.email.clone().unwrap_or_default(),
            phone: u.phone.clone().unwrap_or_default(),
            position: u.position.clone().unwrap_or_default(),
        }
    }
}

// ── Table renderers ──────────────────────────────────────────────────

pub fn sites_table(result: &SourceResult<Site>) -> String {
    source_table(result, |s| SiteRow::from(s))
}

pub fn users_table(result: &SourceResult<User>) -> String {
    source_table(result, |u| UserRow::from(u))
}

pub fn view_table(view: &OrganizationView) -> String {
    let mut out = format!("Organization {}\n\nSites\n", view.organization_id);
    out.push_str(&sites_table(&view.sites));
    out.push_str("\n\nUsers\n");
    out.push_str(&users_table(&view.users));
    out
}

fn source_table<T, R: Tabled>(result: &SourceResult<T>, to_row: impl Fn(&T) -> R) -> String {
    match result {
        SourceResult::Succeeded { data } if data.is_empty() => "(none)".to_owned(),
        SourceResult::Succeeded { data } => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        SourceResult::Unavailable { kind, reason } => format!("unavailable ({kind}): {reason}"),
    }
}
