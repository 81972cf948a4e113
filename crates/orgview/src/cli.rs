//! Clap derive structures for the `orgview` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// orgview -- everything the site and user services know about an organization
#[derive(Debug, Parser)]
#[command(
    name = "orgview",
    version,
    about = "Show an organization's sites and users across services",
    long_about = "Queries the site and user services concurrently and merges what they return.\n\n\
        A service that cannot be reached is reported as unavailable in the output;\n\
        the command still succeeds with whatever the other service returned.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "ORGVIEW_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Site service base URL (overrides config)
    #[arg(long, global = true)]
    pub site_service: Option<String>,

    /// User service base URL (overrides config)
    #[arg(long, global = true)]
    pub user_service: Option<String>,

    /// Total request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Connect timeout in seconds
    #[arg(long, global = true)]
    pub connect_timeout: Option<u64>,

    /// Retry a failed connection once, after a short jittered delay
    #[arg(long, global = true)]
    pub retry: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ORGVIEW_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty tables (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merged view of an organization's sites and users
    #[command(alias = "v")]
    View(ViewArgs),

    /// Sites of an organization (site service only)
    Sites(SitesArgs),

    /// Users of an organization (user service only)
    Users(UsersArgs),

    /// Inspect the resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Organization identifier (positive integer)
    #[arg(allow_negative_numbers = true)]
    pub organization_id: i64,

    /// Fetch sites with their users embedded
    #[arg(long)]
    pub with_site_users: bool,
}

#[derive(Debug, Args)]
pub struct SitesArgs {
    /// Organization identifier (positive integer)
    #[arg(allow_negative_numbers = true)]
    pub organization_id: i64,

    /// Embed each site's users
    #[arg(long)]
    pub with_users: bool,
}

#[derive(Debug, Args)]
pub struct UsersArgs {
    /// Organization identifier (positive integer)
    #[arg(allow_negative_numbers = true)]
    pub organization_id: i64,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings (tokens redacted)
    Show,
    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
