//! Organization view, site and user command handlers.

use orgview_core::{Aggregator, CancellationToken, SiteDetail};

use crate::cli::{GlobalOpts, SitesArgs, UsersArgs, ViewArgs};
use crate::error::CliError;
use crate::output;

pub async fn view(
    aggregator: &Aggregator,
    args: ViewArgs,
    cancel: &CancellationToken,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let detail = if args.with_site_users {
        SiteDetail::WithUsers
    } else {
        SiteDetail::Plain
    };

    let view = aggregator
        .get_organization_view_cancellable(args.organization_id, detail, cancel)
        .await?;

    if !view.is_complete() {
        tracing::debug!(unavailable = ?view.unavailable_sources(), "degraded view");
    }

    let out = output::render(global.output, &view, output::view_table)?;
    output::print_output(&out)
}

pub async fn sites(
    aggregator: &Aggregator,
    args: SitesArgs,
    cancel: &CancellationToken,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let detail = if args.with_users {
        SiteDetail::WithUsers
    } else {
        SiteDetail::Plain
    };

    let result = aggregator
        .get_sites_cancellable(args.organization_id, detail, cancel)
        .await?;
    let out = output::render(global.output, &result, output::sites_table)?;
    output::print_output(&out)
}

pub async fn users(
    aggregator: &Aggregator,
    args: UsersArgs,
    cancel: &CancellationToken,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = aggregator
        .get_users_cancellable(args.organization_id, cancel)
        .await?;
    let out = output::render(global.output, &result, output::users_table)?;
    output::print_output(&out)
}
