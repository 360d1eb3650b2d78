use std::path::PathBuf;

use anyhow::Context;
use tempo_config::ExportFormat;
use tempo_core::responses::ExportResponse;
use tempo_export::ExportSummary;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExportCommands;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tempo export`.
pub async fn handle(
    action: &ExportCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ExportCommands::Timesheet { project, csv, out } => {
            timesheet(project, *csv, out.as_deref(), ctx, flags).await
        }
    }
}

async fn timesheet(
    project: &str,
    csv: bool,
    out: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = resolve::project(ctx, project).await?;
    let mut paths = ctx.project_paths(&project).await?;
    if let Some(dir) = out {
        paths = paths.with_root(PathBuf::from(dir));
    }
    let format = if csv {
        ExportFormat::Csv
    } else {
        ctx.config.export.format
    };

    let records = ctx.service.project_timesheets(&project.id).await?;
    let skipped = records.iter().filter(|r| r.end_time.is_none()).count();
    if skipped > 0 {
        tracing::warn!(skipped, "running timesheets are left out of the export");
    }

    let summary = ctx
        .zone
        .export(&paths, format, &records)
        .with_context(|| format!("export timesheet of '{}'", project.title))?;
    output(&export_response(summary)?, flags.format)
}

fn export_response(summary: ExportSummary) -> anyhow::Result<ExportResponse> {
    Ok(ExportResponse {
        files: summary
            .files
            .iter()
            .map(|path| path.display().to_string())
            .collect(),
        timesheet_rows: u32::try_from(summary.timesheet_rows)?,
        day_rows: u32::try_from(summary.day_rows)?,
    })
}
