//! Command dispatch: bridges CLI args -> aggregator calls -> output formatting.

pub mod config_cmd;
pub mod view;

use orgview_core::{Aggregator, CancellationToken};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    aggregator: &Aggregator,
    cancel: &CancellationToken,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::View(args) => view::view(aggregator, args, cancel, global).await,
        Command::Sites(args) => view::sites(aggregator, args, cancel, global).await,
        Command::Users(args) => view::users(aggregator, args, cancel, global).await,
        // Handled in main before any client is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
