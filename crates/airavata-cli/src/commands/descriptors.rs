use airavata_registry_client::DescriptorKind;

use crate::cli::{DescriptorArgs, DescriptorKindArgs, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::{render_document, render_flag, render_names};

pub(crate) async fn handle_descriptor_exists(
    ctx: &AppContext,
    args: DescriptorArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let exists = ctx
        .registry
        .descriptors()
        .descriptor_exists(args.kind.into(), &args.name)
        .await?;
    render_flag(&args.name, exists, format)
}

pub(crate) async fn handle_descriptor_get(
    ctx: &AppContext,
    args: DescriptorArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let document = ctx
        .registry
        .descriptors()
        .get_descriptor(args.kind.into(), &args.name)
        .await?;
    render_document(&args.name, document.as_deref(), format)
}

pub(crate) async fn handle_descriptor_list(
    ctx: &AppContext,
    args: DescriptorKindArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let kind = DescriptorKind::from(args.kind);
    let names = ctx.registry.descriptors().descriptor_names(kind).await?;
    render_names(&format!("{kind} descriptor"), &names, format)
}

pub(crate) async fn handle_descriptor_remove(
    ctx: &AppContext,
    args: DescriptorArgs,
) -> CliResult<String> {
    let kind = DescriptorKind::from(args.kind);
    ctx.registry
        .descriptors()
        .remove_descriptor(kind, &args.name)
        .await?;
    Ok(format!("Removed {kind} descriptor '{}'.", args.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DescriptorKindArg;
    use crate::commands::test_support::{api_path, context};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn descriptor_list_uses_kind_heading() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(api_path("descriptorsregistry/get/hostdescriptor/names"));
            then.status(200).json_body(json!(["bigred", "ranger"]));
        });

        let output = handle_descriptor_list(
            &context(&server),
            DescriptorKindArgs {
                kind: DescriptorKindArg::Host,
            },
            OutputFormat::Table,
        )
        .await
        .expect("list succeeds");
        assert_eq!(output, "HOST DESCRIPTOR\nbigred\nranger");
        mock.assert();
    }

    #[tokio::test]
    async fn descriptor_remove_targets_kind_path() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path(api_path("descriptorsregistry/delete/servicedescriptor"))
                .query_param("serviceDescriptorName", "echo");
            then.status(200);
        });

        let output = handle_descriptor_remove(
            &context(&server),
            DescriptorArgs {
                kind: DescriptorKindArg::Service,
                name: "echo".to_string(),
            },
        )
        .await
        .expect("remove succeeds");
        assert_eq!(output, "Removed service descriptor 'echo'.");
        mock.assert();
    }
}
