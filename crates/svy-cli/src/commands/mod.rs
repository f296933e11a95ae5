use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod create;
pub mod fetch;
pub mod publish;
pub mod report;
pub mod run;
pub mod status;
pub mod validate;
pub mod wait;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Create(args) => create::handle(&args, ctx, flags).await,
        Commands::Publish => publish::handle(ctx, flags).await,
        Commands::Status => status::handle(ctx, flags).await,
        Commands::Wait(args) => wait::handle(&args, ctx, flags).await,
        Commands::Fetch => fetch::handle(ctx, flags).await,
        Commands::Report(args) => report::handle(&args, ctx, flags).await,
        Commands::Run(args) => run::handle(&args, ctx, flags).await,
        Commands::Validate(args) => validate::handle(&args, flags),
    }
}
