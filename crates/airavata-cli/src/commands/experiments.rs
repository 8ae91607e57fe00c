use crate::cli::{ExperimentIdArgs, ExperimentListArgs, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::{render_experiment, render_experiments};

pub(crate) async fn handle_experiment_get(
    ctx: &AppContext,
    args: ExperimentIdArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let experiment = ctx.registry.experiments().get_experiment(&args.id).await?;
    render_experiment(&experiment, format)
}

pub(crate) async fn handle_experiment_list(
    ctx: &AppContext,
    args: ExperimentListArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let experiments = ctx
        .registry
        .experiments()
        .get_experiments(args.project.as_deref())
        .await?;
    render_experiments(&experiments, format)
}

pub(crate) async fn handle_experiment_remove(
    ctx: &AppContext,
    args: ExperimentIdArgs,
) -> CliResult<String> {
    ctx.registry.experiments().remove_experiment(&args.id).await?;
    Ok(format!("Experiment '{}' removed.", args.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{api_path, context};
    use httpmock::prelude::*;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn experiment_list_passes_project_filter() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(api_path("experimentregistry/get/experiments"))
                .query_param("projectName", "climate");
            then.status(200).json_body(json!([
                {"experimentId": "exp-1", "projectName": "climate"}
            ]));
        });

        let output = handle_experiment_list(
            &context(&server),
            ExperimentListArgs {
                project: Some("climate".to_string()),
            },
            OutputFormat::Json,
        )
        .await
        .expect("list succeeds");
        let value: Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(value[0]["experimentId"], "exp-1");
        mock.assert();
    }

    #[tokio::test]
    async fn missing_experiment_is_validation_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path(api_path("experimentregistry/get/experiment"))
                .query_param("experimentId", "exp-404");
            then.status(204);
        });

        let err = handle_experiment_get(
            &context(&server),
            ExperimentIdArgs {
                id: "exp-404".to_string(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("absent experiment");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn experiment_remove_issues_delete() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path(api_path("experimentregistry/delete/experiment"))
                .query_param("experimentId", "exp-1");
            then.status(200);
        });

        let output = handle_experiment_remove(
            &context(&server),
            ExperimentIdArgs {
                id: "exp-1".to_string(),
            },
        )
        .await
        .expect("remove succeeds");
        assert_eq!(output, "Experiment 'exp-1' removed.");
        mock.assert();
    }
}
