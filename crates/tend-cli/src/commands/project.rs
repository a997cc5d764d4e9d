use anyhow::Context;
use tend_core::project::ProjectDescriptor;

use crate::catalog::parse_repo;
use crate::cli::{GlobalFlags, ProjectArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `tend project`.
pub async fn handle(
    args: &ProjectArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = descriptor(args)?;
    let record = ctx
        .builder
        .build(&project, &[])
        .await
        .with_context(|| format!("failed to build status for {}", args.repo))?;
    output(&record, flags.format)
}

fn descriptor(args: &ProjectArgs) -> anyhow::Result<ProjectDescriptor> {
    let (owner, name) = parse_repo(&args.repo)?;
    let id = args.id.clone().unwrap_or_else(|| name.clone());
    let mut project = ProjectDescriptor::new(id, owner, name);
    if let Some(path) = &args.path {
        project = project.with_path(path);
    }
    if let Some(pkg) = &args.pkg {
        project = project.with_pkg(pkg);
    }
    Ok(project)
}
