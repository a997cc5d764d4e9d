use futures::stream::{self, StreamExt};
use tend_core::project::ProjectDescriptor;
use tend_core::record::StatusRecord;
use tend_status::StatusError;

use crate::catalog::{History, filter_projects, load_catalog, load_history};
use crate::cli::{GlobalFlags, StatusArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `tend status`.
///
/// Records are built concurrently but printed in catalog order. Failed
/// projects are logged and skipped; the command fails once all successful
/// records have been printed.
pub async fn handle(
    args: &StatusArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let projects = filter_projects(load_catalog(&args.catalog)?, &args.only)?;
    let history = load_history(args.history.as_deref())?;
    let total = projects.len();

    let results = build_all(ctx, &projects, &history).await;
    let (records, failures) = split(results);

    for failure in &failures {
        tracing::warn!(
            project = failure.project(),
            rate_limited = failure.is_rate_limited(),
            error = %failure,
            "skipping project"
        );
    }

    output(&records, flags.format)?;

    if failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} of {total} projects failed", failures.len())
    }
}

async fn build_all(
    ctx: &AppContext,
    projects: &[ProjectDescriptor],
    history: &History,
) -> Vec<Result<StatusRecord, StatusError>> {
    stream::iter(projects)
        .map(|project| {
            let prior = history.get(&project.id).map_or(&[][..], Vec::as_slice);
            ctx.builder.build(project, prior)
        })
        .buffered(ctx.concurrency.max(1))
        .collect()
        .await
}

fn split(
    results: Vec<Result<StatusRecord, StatusError>>,
) -> (Vec<StatusRecord>, Vec<StatusError>) {
    let mut records = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(error) => failures.push(error),
        }
    }
    (records, failures)
}
