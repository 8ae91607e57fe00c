use crate::cli::{NameArgs, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::{render_document, render_flag, render_names};

pub(crate) async fn handle_workflow_list(
    ctx: &AppContext,
    format: OutputFormat,
) -> CliResult<String> {
    let names = ctx.registry.user_workflows().get_workflow_names().await?;
    render_names("workflow", &names, format)
}

pub(crate) async fn handle_workflow_get(
    ctx: &AppContext,
    args: NameArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let graph = ctx
        .registry
        .user_workflows()
        .get_workflow_graph(&args.name)
        .await?;
    render_document(&args.name, graph.as_deref(), format)
}

pub(crate) async fn handle_workflow_exists(
    ctx: &AppContext,
    args: NameArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let exists = ctx
        .registry
        .user_workflows()
        .workflow_exists(&args.name)
        .await?;
    render_flag(&args.name, exists, format)
}

pub(crate) async fn handle_workflow_remove(ctx: &AppContext, args: NameArgs) -> CliResult<String> {
    ctx.registry
        .user_workflows()
        .remove_workflow(&args.name)
        .await?;
    Ok(format!("Workflow '{}' removed.", args.name))
}
