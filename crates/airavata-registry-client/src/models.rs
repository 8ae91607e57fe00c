//! Payload carriers exchanged with the registry.
//!
//! Only the identifying fields the endpoints need are modelled. Descriptor
//! documents and workflow graphs travel as opaque text.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name.
    #[serde(rename = "projectName")]
    pub name: String,
}

impl Project {
    /// Creates a project with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Experiment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    /// Experiment identifier.
    #[serde(rename = "experimentId")]
    pub id: String,
    /// Owning project name.
    #[serde(rename = "projectName")]
    pub project: String,
    /// User that submitted the experiment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_user: Option<String>,
    /// Human-readable experiment name.
    #[serde(
        rename = "experimentName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

/// Execution state of a workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionState {
    /// Execution has been accepted but not started.
    Launched,
    /// Execution is running.
    Started,
    /// Execution is paused.
    Paused,
    /// Execution stopped with an error.
    Failed,
    /// Execution completed.
    Finished,
    /// State reported by the registry is not recognised.
    #[serde(other)]
    Unknown,
}

impl ExecutionState {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Launched => "LAUNCHED",
            Self::Started => "STARTED",
            Self::Paused => "PAUSED",
            Self::Failed => "FAILED",
            Self::Finished => "FINISHED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Display for ExecutionState {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Status snapshot of a workflow instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInstanceStatus {
    /// Execution state.
    #[serde(rename = "executionStatus")]
    pub state: ExecutionState,
    /// Time the state was last recorded.
    #[serde(
        rename = "statusUpdateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Descriptor families managed by the descriptor registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    /// Compute host descriptor.
    Host,
    /// Service descriptor.
    Service,
    /// Application deployment descriptor.
    Application,
}

impl DescriptorKind {
    /// Path segment identifying the descriptor family.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Host => "hostdescriptor",
            Self::Service => "servicedescriptor",
            Self::Application => "applicationdescriptor",
        }
    }

    /// Parameter key carrying the descriptor name.
    #[must_use]
    pub const fn name_param(self) -> &'static str {
        match self {
            Self::Host => "hostDescriptorName",
            Self::Service => "serviceDescriptorName",
            Self::Application => "applicationDescriptorName",
        }
    }
}

impl Display for DescriptorKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Host => "host",
            Self::Service => "service",
            Self::Application => "application",
        })
    }
}
