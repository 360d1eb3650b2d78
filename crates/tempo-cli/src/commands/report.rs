use tempo_core::hours::{duration_to_string, hour_display};
use tempo_core::report::total_duration;
use tempo_core::responses::HoursReport;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tempo report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::Hours { project } => hours(project, ctx, flags).await,
    }
}

async fn hours(project: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = resolve::project(ctx, project).await?;
    let records = ctx.service.project_timesheets(&project.id).await?;
    let days = ctx.zone.group(&records);
    let total = total_duration(&records);
    output(
        &HoursReport {
            project: project.title,
            days,
            total_hours: duration_to_string(total),
            total_hours_display: hour_display(total),
        },
        flags.format,
    )
}
