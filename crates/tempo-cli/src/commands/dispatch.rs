use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Customer { action } => commands::customer::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Sprint { action } => commands::sprint::handle(&action, ctx, flags).await,
        Commands::Milestone { action } => commands::milestone::handle(&action, ctx, flags).await,
        Commands::Label { action } => commands::label::handle(&action, ctx, flags).await,
        Commands::Tag { action } => commands::tag::handle(&action, ctx, flags).await,
        Commands::Issue { action } => commands::issue::handle(&action, ctx, flags).await,
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Timer { action } => commands::timer::handle(&action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
        Commands::Export { action } => commands::export::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
