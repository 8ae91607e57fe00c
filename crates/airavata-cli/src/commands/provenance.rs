use crate::cli::{ExperimentIdArgs, OutputFormat, WorkflowInstanceArgs};
use crate::client::{AppContext, CliResult};
use crate::output::{render_value, render_workflow_status};

pub(crate) async fn handle_execution_user(
    ctx: &AppContext,
    args: ExperimentIdArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let user = ctx
        .registry
        .provenance()
        .get_experiment_execution_user(&args.id)
        .await?;
    render_value("executionUser", user.as_deref(), format)
}

pub(crate) async fn handle_experiment_name(
    ctx: &AppContext,
    args: ExperimentIdArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let name = ctx
        .registry
        .provenance()
        .get_experiment_name(&args.id)
        .await?;
    render_value("experimentName", name.as_deref(), format)
}

pub(crate) async fn handle_workflow_status(
    ctx: &AppContext,
    args: WorkflowInstanceArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let status = ctx
        .registry
        .provenance()
        .get_workflow_instance_status(&args.instance)
        .await?;
    render_workflow_status(&args.instance, status.as_ref(), format)
}
