use airavata_registry_client::Project;

use crate::cli::{NameArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_flag, render_project, render_projects};

pub(crate) async fn handle_project_get(
    ctx: &AppContext,
    args: NameArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let project = ctx.registry.projects().get_project(&args.name).await?;
    render_project(&project, format)
}

pub(crate) async fn handle_project_list(
    ctx: &AppContext,
    format: OutputFormat,
) -> CliResult<String> {
    let projects = ctx.registry.projects().get_projects().await?;
    render_projects(&projects, format)
}

pub(crate) async fn handle_project_exists(
    ctx: &AppContext,
    args: NameArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let exists = ctx.registry.projects().project_exists(&args.name).await?;
    render_flag(&args.name, exists, format)
}

pub(crate) async fn handle_project_add(ctx: &AppContext, args: NameArgs) -> CliResult<String> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::validation("project name cannot be empty"));
    }
    ctx.registry.projects().add_project(&Project::new(name)).await?;
    Ok(format!("Project '{name}' added."))
}

pub(crate) async fn handle_project_remove(ctx: &AppContext, args: NameArgs) -> CliResult<String> {
    ctx.registry.projects().delete_project(&args.name).await?;
    Ok(format!("Project '{}' removed.", args.name))
}
