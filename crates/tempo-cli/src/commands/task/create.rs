use tempo_db::repos::task::NewTask;

use crate::cli::GlobalFlags;
use crate::commands::shared::clock::parse_clock;
use crate::commands::shared::parse::parse_estimate;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub project: String,
    pub title: String,
    pub annotation: Option<String>,
    pub estimate: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = resolve::project(ctx, &params.project).await?;
    let new = NewTask {
        annotation: params.annotation,
        estimate: params.estimate.as_deref().map(parse_estimate).transpose()?,
        start_time: params
            .start
            .as_deref()
            .map(|raw| parse_clock(raw, "--start"))
            .transpose()?,
        end_time: params
            .end
            .as_deref()
            .map(|raw| parse_clock(raw, "--end"))
            .transpose()?,
        ..NewTask::new(params.title, project.id)
    };
    let task = ctx.service.create_task(&new).await?;
    output(&task, flags.format)
}
