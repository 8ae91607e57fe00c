//! Argument parsing and command dispatch for the `airavata` binary.

use std::time::Duration;

use airavata_registry_client::DescriptorKind;
use airavata_telemetry::{LogFormat, LoggingConfig, build_sha, init_logging, with_request_context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, ConnectionSettings, parse_url};
use crate::commands::{config, descriptors, experiments, projects, provenance, workflows};

const DEFAULT_REGISTRY_URL: &str = "http://127.0.0.1:8080/airavata-registry/api/";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CLI_LOG_LEVEL: &str = "error";

/// Parses CLI arguments, executes the requested command inside a request
/// context, and returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let format = cli
        .log_format
        .as_deref()
        .map_or_else(LogFormat::infer, LogFormat::from_name);
    if let Err(err) = init_logging(&LoggingConfig {
        level: &cli.log_level,
        format,
        build_sha: build_sha(),
    }) {
        eprintln!("warning: {err}");
    }

    let command_name = command_label(&cli.command);
    let request_id = Uuid::new_v4().to_string();
    tracing::debug!(command = command_name, %request_id, "starting command");

    match with_request_context(request_id, command_name, execute(cli)).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            0
        }
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli) -> CliResult<String> {
    let ctx = AppContext::connect(ConnectionSettings {
        registry_url: cli.registry_url,
        username: cli.user,
        password: cli.password,
        password_env: cli.password_env,
        timeout: Duration::from_secs(cli.timeout),
    })?;
    dispatch(&ctx, cli.command, cli.output).await
}

pub(crate) async fn dispatch(
    ctx: &AppContext,
    command: Command,
    format: OutputFormat,
) -> CliResult<String> {
    match command {
        Command::Project(command) => match command {
            ProjectCommand::Get(args) => projects::handle_project_get(ctx, args, format).await,
            ProjectCommand::List => projects::handle_project_list(ctx, format).await,
            ProjectCommand::Exists(args) => {
                projects::handle_project_exists(ctx, args, format).await
            }
            ProjectCommand::Add(args) => projects::handle_project_add(ctx, args).await,
            ProjectCommand::Remove(args) => projects::handle_project_remove(ctx, args).await,
        },
        Command::Experiment(command) => match command {
            ExperimentCommand::Get(args) => {
                experiments::handle_experiment_get(ctx, args, format).await
            }
            ExperimentCommand::List(args) => {
                experiments::handle_experiment_list(ctx, args, format).await
            }
            ExperimentCommand::Remove(args) => {
                experiments::handle_experiment_remove(ctx, args).await
            }
        },
        Command::Provenance(command) => match command {
            ProvenanceCommand::ExecutionUser(args) => {
                provenance::handle_execution_user(ctx, args, format).await
            }
            ProvenanceCommand::ExperimentName(args) => {
                provenance::handle_experiment_name(ctx, args, format).await
            }
            ProvenanceCommand::WorkflowStatus(args) => {
                provenance::handle_workflow_status(ctx, args, format).await
            }
        },
        Command::Descriptor(command) => match command {
            DescriptorCommand::Exists(args) => {
                descriptors::handle_descriptor_exists(ctx, args, format).await
            }
            DescriptorCommand::Get(args) => {
                descriptors::handle_descriptor_get(ctx, args, format).await
            }
            DescriptorCommand::List(args) => {
                descriptors::handle_descriptor_list(ctx, args, format).await
            }
            DescriptorCommand::Remove(args) => {
                descriptors::handle_descriptor_remove(ctx, args).await
            }
        },
        Command::Workflow(command) => match command {
            WorkflowCommand::List => workflows::handle_workflow_list(ctx, format).await,
            WorkflowCommand::Get(args) => workflows::handle_workflow_get(ctx, args, format).await,
            WorkflowCommand::Exists(args) => {
                workflows::handle_workflow_exists(ctx, args, format).await
            }
            WorkflowCommand::Remove(args) => workflows::handle_workflow_remove(ctx, args).await,
        },
        Command::Config(command) => match command {
            ConfigCommand::Get(args) => config::handle_config_get(ctx, args, format).await,
            ConfigCommand::Set(args) => config::handle_config_set(ctx, args).await,
        },
    }
}

#[derive(Parser)]
#[command(
    name = "airavata",
    version,
    about = "Command-line client for the Airavata registry"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "AIRAVATA_REGISTRY_URL",
        value_parser = parse_url,
        default_value = DEFAULT_REGISTRY_URL
    )]
    registry_url: Url,
    #[arg(
        long,
        short = 'u',
        global = true,
        env = "AIRAVATA_REGISTRY_USER",
        default_value = DEFAULT_USERNAME
    )]
    user: String,
    #[arg(
        long,
        global = true,
        env = "AIRAVATA_REGISTRY_PASSWORD",
        hide_env_values = true,
        help = "Password sent when the registry asks for credentials; prompts when omitted"
    )]
    password: Option<String>,
    #[arg(
        long,
        global = true,
        value_name = "VAR",
        help = "Environment variable holding the password, read only when the registry asks"
    )]
    password_env: Option<String>,
    #[arg(
        long,
        global = true,
        env = "AIRAVATA_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[arg(long, global = true, env = "AIRAVATA_LOG_FORMAT")]
    log_format: Option<String>,
    #[arg(
        long,
        global = true,
        env = "AIRAVATA_LOG_LEVEL",
        default_value = DEFAULT_CLI_LOG_LEVEL
    )]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    Experiment(ExperimentCommand),
    #[command(subcommand)]
    Provenance(ProvenanceCommand),
    #[command(subcommand)]
    Descriptor(DescriptorCommand),
    #[command(subcommand)]
    Workflow(WorkflowCommand),
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub(crate) enum ProjectCommand {
    Get(NameArgs),
    List,
    Exists(NameArgs),
    Add(NameArgs),
    Remove(NameArgs),
}

#[derive(Subcommand)]
pub(crate) enum ExperimentCommand {
    Get(ExperimentIdArgs),
    List(ExperimentListArgs),
    Remove(ExperimentIdArgs),
}

#[derive(Subcommand)]
pub(crate) enum ProvenanceCommand {
    ExecutionUser(ExperimentIdArgs),
    ExperimentName(ExperimentIdArgs),
    WorkflowStatus(WorkflowInstanceArgs),
}

#[derive(Subcommand)]
pub(crate) enum DescriptorCommand {
    Exists(DescriptorArgs),
    Get(DescriptorArgs),
    List(DescriptorKindArgs),
    Remove(DescriptorArgs),
}

#[derive(Subcommand)]
pub(crate) enum WorkflowCommand {
    List,
    Get(NameArgs),
    Exists(NameArgs),
    Remove(NameArgs),
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommand {
    Get(ConfigKeyArgs),
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub(crate) struct NameArgs {
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct ExperimentIdArgs {
    #[arg(help = "Experiment identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct ExperimentListArgs {
    #[arg(long, help = "Only list experiments that belong to this project")]
    pub(crate) project: Option<String>,
}

#[derive(Args)]
pub(crate) struct WorkflowInstanceArgs {
    #[arg(help = "Workflow instance identifier")]
    pub(crate) instance: String,
}

#[derive(Args)]
pub(crate) struct DescriptorArgs {
    #[arg(long, value_enum)]
    pub(crate) kind: DescriptorKindArg,
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct DescriptorKindArgs {
    #[arg(long, value_enum)]
    pub(crate) kind: DescriptorKindArg,
}

#[derive(Args)]
pub(crate) struct ConfigKeyArgs {
    pub(crate) key: String,
}

#[derive(Args)]
pub(crate) struct ConfigSetArgs {
    pub(crate) key: String,
    pub(crate) value: String,
    #[arg(long, default_value_t = 30, help = "Days until the entry expires")]
    pub(crate) ttl_days: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DescriptorKindArg {
    Host,
    Service,
    Application,
}

impl From<DescriptorKindArg> for DescriptorKind {
    fn from(kind: DescriptorKindArg) -> Self {
        match kind {
            DescriptorKindArg::Host => Self::Host,
            DescriptorKindArg::Service => Self::Service,
            DescriptorKindArg::Application => Self::Application,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

pub(crate) const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Project(command) => match command {
            ProjectCommand::Get(_) => "project_get",
            ProjectCommand::List => "project_list",
            ProjectCommand::Exists(_) => "project_exists",
            ProjectCommand::Add(_) => "project_add",
            ProjectCommand::Remove(_) => "project_remove",
        },
        Command::Experiment(command) => match command {
            ExperimentCommand::Get(_) => "experiment_get",
            ExperimentCommand::List(_) => "experiment_list",
            ExperimentCommand::Remove(_) => "experiment_remove",
        },
        Command::Provenance(command) => match command {
            ProvenanceCommand::ExecutionUser(_) => "provenance_execution_user",
            ProvenanceCommand::ExperimentName(_) => "provenance_experiment_name",
            ProvenanceCommand::WorkflowStatus(_) => "provenance_workflow_status",
        },
        Command::Descriptor(command) => match command {
            DescriptorCommand::Exists(_) => "descriptor_exists",
            DescriptorCommand::Get(_) => "descriptor_get",
            DescriptorCommand::List(_) => "descriptor_list",
            DescriptorCommand::Remove(_) => "descriptor_remove",
        },
        Command::Workflow(command) => match command {
            WorkflowCommand::List => "workflow_list",
            WorkflowCommand::Get(_) => "workflow_get",
            WorkflowCommand::Exists(_) => "workflow_exists",
            WorkflowCommand::Remove(_) => "workflow_remove",
        },
        Command::Config(command) => match command {
            ConfigCommand::Get(_) => "config_get",
            ConfigCommand::Set(_) => "config_set",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn descriptor_commands_require_kind() -> Result<()> {
        let cli = Cli::try_parse_from([
            "airavata",
            "descriptor",
            "get",
            "--kind",
            "application",
            "echo",
        ])?;
        match cli.command {
            Command::Descriptor(DescriptorCommand::Get(args)) => {
                assert_eq!(DescriptorKind::from(args.kind), DescriptorKind::Application);
                assert_eq!(args.name, "echo");
            }
            _ => panic!("unexpected command"),
        }

        assert!(Cli::try_parse_from(["airavata", "descriptor", "get", "echo"]).is_err());
        Ok(())
    }

    #[test]
    fn global_flags_follow_subcommands() -> Result<()> {
        let cli = Cli::try_parse_from([
            "airavata",
            "project",
            "list",
            "--output",
            "json",
            "--registry-url",
            "http://registry.example:9090/api/",
            "--user",
            "scientist",
        ])?;
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.user, "scientist");
        assert_eq!(cli.registry_url.as_str(), "http://registry.example:9090/api/");
        assert_eq!(command_label(&cli.command), "project_list");
        Ok(())
    }

    #[test]
    fn password_env_names_the_variable() -> Result<()> {
        let cli = Cli::try_parse_from([
            "airavata",
            "workflow",
            "list",
            "--password-env",
            "REGISTRY_SECRET",
        ])?;
        assert_eq!(cli.password_env.as_deref(), Some("REGISTRY_SECRET"));
        Ok(())
    }

    #[test]
    fn invalid_registry_url_is_rejected() {
        assert!(
            Cli::try_parse_from(["airavata", "--registry-url", "not a url", "project", "list"])
                .is_err()
        );
    }

    #[test]
    fn config_set_defaults_expiry() -> Result<()> {
        let cli = Cli::try_parse_from(["airavata", "config", "set", "gfac", "enabled"])?;
        match cli.command {
            Command::Config(ConfigCommand::Set(args)) => {
                assert_eq!(args.key, "gfac");
                assert_eq!(args.value, "enabled");
                assert_eq!(args.ttl_days, 30);
            }
            _ => panic!("unexpected command"),
        }
        Ok(())
    }
}
