use tempo_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::clock::parse_clock;
use crate::commands::shared::parse::parse_estimate;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub id: String,
    pub title: Option<String>,
    pub annotation: Option<String>,
    pub report: Option<String>,
    pub estimate: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// An empty string clears an optional field (`--report ""`).
fn cleared(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;

    let mut builder = TaskUpdateBuilder::new();
    if let Some(title) = params.title.as_deref() {
        builder = builder.title(title);
    }
    if let Some(annotation) = params.annotation {
        builder = builder.annotation(cleared(annotation));
    }
    if let Some(report) = params.report {
        builder = builder.report(cleared(report));
    }
    if let Some(estimate) = params.estimate {
        let estimate = cleared(estimate).as_deref().map(parse_estimate).transpose()?;
        builder = builder.estimate(estimate);
    }
    if let Some(start) = params.start {
        let start = cleared(start)
            .as_deref()
            .map(|raw| parse_clock(raw, "--start"))
            .transpose()?;
        builder = builder.start_time(start);
    }
    if let Some(end) = params.end {
        let end = cleared(end)
            .as_deref()
            .map(|raw| parse_clock(raw, "--end"))
            .transpose()?;
        builder = builder.end_time(end);
    }

    let task = resolve::task(ctx, &params.id).await?;
    let task = ctx.service.update_task(&task.id, builder.build()).await?;
    output(&task, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.title.is_none()
        && params.annotation.is_none()
        && params.report.is_none()
        && params.estimate.is_none()
        && params.start.is_none()
        && params.end.is_none()
    {
        anyhow::bail!(
            "At least one of --title, --annotation, --report, --estimate, --start, or --end must be provided"
        );
    }
    Ok(())
}
