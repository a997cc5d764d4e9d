use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod project;
pub mod status;

pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Status(args) => status::handle(&args, ctx, flags).await,
        Commands::Project(args) => project::handle(&args, ctx, flags).await,
    }
}
