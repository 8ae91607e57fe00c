//! Output renderers and formatting helpers for CLI commands.
//!
//! Renderers return the text to print so handlers stay testable; the
//! dispatcher writes it to stdout.

use std::fmt::Write as _;

use airavata_registry_client::{Experiment, Project, WorkflowInstanceStatus};
use anyhow::anyhow;
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const UNSET: &str = "<unset>";

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

pub(crate) fn render_projects(projects: &[Project], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(projects),
        OutputFormat::Table => {
            let mut text = String::from("PROJECT");
            for project in projects {
                let _ = write!(text, "\n{}", project.name);
            }
            Ok(text)
        }
    }
}

pub(crate) fn render_project(project: &Project, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(project),
        OutputFormat::Table => Ok(format!("project: {}", project.name)),
    }
}

pub(crate) fn render_experiments(
    experiments: &[Experiment],
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(experiments),
        OutputFormat::Table => {
            let mut text = format!("{:<24} {:<20} {:<12} NAME", "ID", "PROJECT", "USER");
            for experiment in experiments {
                let _ = write!(
                    text,
                    "\n{:<24} {:<20} {:<12} {}",
                    experiment.id,
                    experiment.project,
                    experiment.submitted_user.as_deref().unwrap_or("-"),
                    experiment.name.as_deref().unwrap_or("<unnamed>")
                );
            }
            Ok(text)
        }
    }
}

pub(crate) fn render_experiment(experiment: &Experiment, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(experiment),
        OutputFormat::Table => Ok(format!(
            "id: {}\nproject: {}\nsubmitted by: {}\nname: {}",
            experiment.id,
            experiment.project,
            experiment.submitted_user.as_deref().unwrap_or(UNSET),
            experiment.name.as_deref().unwrap_or(UNSET)
        )),
    }
}

pub(crate) fn render_flag(subject: &str, present: bool, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&json!({ "name": subject, "exists": present })),
        OutputFormat::Table => Ok(if present {
            format!("{subject}: exists")
        } else {
            format!("{subject}: not found")
        }),
    }
}

/// Renders an optional scalar; absent values are shown as `<unset>` or `null`.
pub(crate) fn render_value(
    label: &str,
    value: Option<&str>,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            let mut object = serde_json::Map::new();
            object.insert(label.to_string(), json!(value));
            to_json(&object)
        }
        OutputFormat::Table => Ok(format!("{label}: {}", value.unwrap_or(UNSET))),
    }
}

/// Renders an opaque document (descriptor or workflow graph) verbatim.
pub(crate) fn render_document(
    name: &str,
    document: Option<&str>,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&json!({ "name": name, "document": document })),
        OutputFormat::Table => Ok(document.map_or_else(
            || format!("{name}: {UNSET}"),
            str::to_string,
        )),
    }
}

pub(crate) fn render_names(heading: &str, names: &[String], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(names),
        OutputFormat::Table => {
            let mut text = heading.to_ascii_uppercase();
            for name in names {
                let _ = write!(text, "\n{name}");
            }
            Ok(text)
        }
    }
}

pub(crate) fn render_workflow_status(
    instance: &str,
    status: Option<&WorkflowInstanceStatus>,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&json!({ "instance": instance, "status": status })),
        OutputFormat::Table => Ok(status.map_or_else(
            || format!("instance: {instance}\nstate: {UNSET}"),
            |status| {
                let updated = status
                    .updated_at
                    .map_or_else(|| UNSET.to_string(), |at| at.to_rfc3339());
                format!(
                    "instance: {instance}\nstate: {}\nupdated: {updated}",
                    status.state
                )
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airavata_registry_client::ExecutionState;
    use anyhow::Result;
    use serde_json::Value;

    #[test]
    fn project_table_lists_names() -> Result<()> {
        let text = render_projects(
            &[Project::new("climate"), Project::new("default")],
            OutputFormat::Table,
        )
        .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(text, "PROJECT\nclimate\ndefault");
        Ok(())
    }

    #[test]
    fn project_json_uses_wire_names() -> Result<()> {
        let text = render_project(&Project::new("climate"), OutputFormat::Json)
            .map_err(|err| anyhow!(err.display_message()))?;
        let value: Value = serde_json::from_str(&text)?;
        assert_eq!(value["projectName"], "climate");
        Ok(())
    }

    #[test]
    fn absent_value_is_marked_unset() -> Result<()> {
        let table = render_value("execution user", None, OutputFormat::Table)
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(table, "execution user: <unset>");

        let json = render_value("executionUser", None, OutputFormat::Json)
            .map_err(|err| anyhow!(err.display_message()))?;
        let value: Value = serde_json::from_str(&json)?;
        assert!(value["executionUser"].is_null());
        Ok(())
    }

    #[test]
    fn flag_table_reads_naturally() -> Result<()> {
        let text = render_flag("climate", false, OutputFormat::Table)
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(text, "climate: not found");
        Ok(())
    }

    #[test]
    fn workflow_status_table_shows_state() -> Result<()> {
        let status = WorkflowInstanceStatus {
            state: ExecutionState::Failed,
            updated_at: None,
        };
        let text = render_workflow_status("wf-1", Some(&status), OutputFormat::Table)
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(text, "instance: wf-1\nstate: FAILED\nupdated: <unset>");
        Ok(())
    }
}
