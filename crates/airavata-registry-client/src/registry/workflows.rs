//! User and published workflow registries. Workflow graphs are opaque text.

use std::sync::Arc;

use crate::accessor::{ResourceAccessor, ResourceFamily, ResourceRequest};
use crate::error::RegistryResult;

const PARAM_WORKFLOW_NAME: &str = "workflowName";
const PARAM_WORKFLOW_GRAPH: &str = "workflowGraph";
const PARAM_PUBLISHED_NAME: &str = "publishWorkflowName";

/// Client for workflows owned by the connected user.
#[derive(Debug, Clone)]
pub struct UserWorkflowRegistry {
    accessor: Arc<ResourceAccessor>,
}

impl UserWorkflowRegistry {
    const FAMILY: ResourceFamily = ResourceFamily::UserWorkflow;

    pub(crate) const fn new(accessor: Arc<ResourceAccessor>) -> Self {
        Self { accessor }
    }

    /// Whether a workflow named `name` exists.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn workflow_exists(&self, name: &str) -> RegistryResult<bool> {
        self.accessor
            .get_flag(
                ResourceRequest::read(Self::FAMILY, "workflow/exist")
                    .param(PARAM_WORKFLOW_NAME, name),
            )
            .await
    }

    /// Stores a new workflow graph.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn add_workflow(&self, name: &str, graph: &str) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(Self::FAMILY, "add/workflow")
                    .param(PARAM_WORKFLOW_NAME, name)
                    .param(PARAM_WORKFLOW_GRAPH, graph),
            )
            .await
    }

    /// Replaces an existing workflow graph.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn update_workflow(&self, name: &str, graph: &str) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(Self::FAMILY, "update/workflow")
                    .param(PARAM_WORKFLOW_NAME, name)
                    .param(PARAM_WORKFLOW_GRAPH, graph),
            )
            .await
    }

    /// Graph of the workflow named `name`, if present.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_workflow_graph(&self, name: &str) -> RegistryResult<Option<String>> {
        self.accessor
            .get_optional_text(
                ResourceRequest::read(Self::FAMILY, "get/workflowgraph")
                    .param(PARAM_WORKFLOW_NAME, name),
            )
            .await
    }

    /// Names of every workflow.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_workflow_names(&self) -> RegistryResult<Vec<String>> {
        Ok(self
            .accessor
            .get_optional_json(ResourceRequest::read(Self::FAMILY, "get/workflows"))
            .await?
            .unwrap_or_default())
    }

    /// Deletes the workflow named `name`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn remove_workflow(&self, name: &str) -> RegistryResult<()> {
        self.accessor
            .delete(
                ResourceRequest::delete(Self::FAMILY, "remove/workflow")
                    .param(PARAM_WORKFLOW_NAME, name),
            )
            .await
    }
}

/// Client for workflows published for every user.
#[derive(Debug, Clone)]
pub struct PublishedWorkflowRegistry {
    accessor: Arc<ResourceAccessor>,
}

impl PublishedWorkflowRegistry {
    const FAMILY: ResourceFamily = ResourceFamily::PublishedWorkflow;

    pub(crate) const fn new(accessor: Arc<ResourceAccessor>) -> Self {
        Self { accessor }
    }

    /// Whether a published workflow named `name` exists.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn is_published(&self, name: &str) -> RegistryResult<bool> {
        self.accessor
            .get_flag(
                ResourceRequest::read(Self::FAMILY, "publishwf/exist")
                    .param(PARAM_WORKFLOW_NAME, name),
            )
            .await
    }

    /// Publishes the user workflow `name` as `published_name`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn publish_workflow(&self, name: &str, published_name: &str) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(Self::FAMILY, "publish/workflow")
                    .param(PARAM_WORKFLOW_NAME, name)
                    .param(PARAM_PUBLISHED_NAME, published_name),
            )
            .await
    }

    /// Graph of the published workflow `name`, if present.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_published_graph(&self, name: &str) -> RegistryResult<Option<String>> {
        self.accessor
            .get_optional_text(
                ResourceRequest::read(Self::FAMILY, "get/publishworkflowgraph")
                    .param(PARAM_WORKFLOW_NAME, name),
            )
            .await
    }

    /// Names of every published workflow.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_published_names(&self) -> RegistryResult<Vec<String>> {
        Ok(self
            .accessor
            .get_optional_json(ResourceRequest::read(
                Self::FAMILY,
                "get/publishworkflownames",
            ))
            .await?
            .unwrap_or_default())
    }

    /// Withdraws the published workflow `name`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn remove_published(&self, name: &str) -> RegistryResult<()> {
        self.accessor
            .delete(
                ResourceRequest::delete(Self::FAMILY, "remove/publishwf")
                    .param(PARAM_WORKFLOW_NAME, name),
            )
            .await
    }
}
