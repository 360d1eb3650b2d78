use crate::cli::GlobalFlags;
use crate::cli::subcommands::TagCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tempo tag`.
pub async fn handle(
    action: &TagCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TagCommands::Create { tag } => {
            let created = ctx.service.create_tag(tag).await?;
            output(&created, flags.format)
        }
        TagCommands::List => {
            let tags = ctx.service.list_tags().await?;
            output(&tags, flags.format)
        }
    }
}
