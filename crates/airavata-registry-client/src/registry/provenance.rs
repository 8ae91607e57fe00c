//! Provenance registry: who ran an experiment, under what name, and how far it got.
//!
//! Most reads here model optional fields; the registry answers `204` when
//! the field was never recorded, which surfaces as `None`.

use std::sync::Arc;

use chrono::SecondsFormat;

use crate::accessor::{ResourceAccessor, ResourceFamily, ResourceRequest};
use crate::error::RegistryResult;
use crate::models::WorkflowInstanceStatus;

const FAMILY: ResourceFamily = ResourceFamily::Provenance;

const GET_EXECUTION_USER: &str = "get/experiment/executionuser";
const UPDATE_EXECUTION_USER: &str = "update/experiment/executionuser";
const GET_EXPERIMENT_NAME: &str = "get/experimentname";
const UPDATE_EXPERIMENT_NAME: &str = "update/experimentname";
const GET_EXPERIMENT_METADATA: &str = "get/experimentmetadata";
const UPDATE_EXPERIMENT_METADATA: &str = "update/experimentmetadata";
const GET_WORKFLOW_STATUS: &str = "get/workflowinstancestatus";
const UPDATE_WORKFLOW_STATUS: &str = "update/workflowinstancestatus";

const PARAM_EXPERIMENT_ID: &str = "experimentId";
const PARAM_USER: &str = "user";
const PARAM_EXPERIMENT_NAME: &str = "experimentName";
const PARAM_METADATA: &str = "metadata";
const PARAM_WORKFLOW_INSTANCE_ID: &str = "workflowInstanceId";
const PARAM_EXECUTION_STATUS: &str = "executionStatus";
const PARAM_STATUS_UPDATE_TIME: &str = "statusUpdateTime";

/// Client for execution provenance.
#[derive(Debug, Clone)]
pub struct ProvenanceRegistry {
    accessor: Arc<ResourceAccessor>,
}

impl ProvenanceRegistry {
    pub(crate) const fn new(accessor: Arc<ResourceAccessor>) -> Self {
        Self { accessor }
    }

    /// User that executed experiment `id`, if recorded.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_experiment_execution_user(&self, id: &str) -> RegistryResult<Option<String>> {
        self.read_optional(GET_EXECUTION_USER, id).await
    }

    /// Records the user that executed experiment `id`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn update_experiment_execution_user(&self, id: &str, user: &str) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(FAMILY, UPDATE_EXECUTION_USER)
                    .param(PARAM_EXPERIMENT_ID, id)
                    .param(PARAM_USER, user),
            )
            .await
    }

    /// Name given to experiment `id`, if recorded.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_experiment_name(&self, id: &str) -> RegistryResult<Option<String>> {
        self.read_optional(GET_EXPERIMENT_NAME, id).await
    }

    /// Renames experiment `id`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn update_experiment_name(&self, id: &str, name: &str) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(FAMILY, UPDATE_EXPERIMENT_NAME)
                    .param(PARAM_EXPERIMENT_ID, id)
                    .param(PARAM_EXPERIMENT_NAME, name),
            )
            .await
    }

    /// Free-form metadata attached to experiment `id`, if any.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_experiment_metadata(&self, id: &str) -> RegistryResult<Option<String>> {
        self.read_optional(GET_EXPERIMENT_METADATA, id).await
    }

    /// Replaces the metadata attached to experiment `id`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn update_experiment_metadata(&self, id: &str, metadata: &str) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(FAMILY, UPDATE_EXPERIMENT_METADATA)
                    .param(PARAM_EXPERIMENT_ID, id)
                    .param(PARAM_METADATA, metadata),
            )
            .await
    }

    /// Latest status of workflow instance `instance`, if recorded.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_workflow_instance_status(
        &self,
        instance: &str,
    ) -> RegistryResult<Option<WorkflowInstanceStatus>> {
        self.accessor
            .get_optional_json(
                ResourceRequest::read(FAMILY, GET_WORKFLOW_STATUS)
                    .param(PARAM_WORKFLOW_INSTANCE_ID, instance),
            )
            .await
    }

    /// Records a status for workflow instance `instance`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn update_workflow_instance_status(
        &self,
        instance: &str,
        status: &WorkflowInstanceStatus,
    ) -> RegistryResult<()> {
        let mut request = ResourceRequest::write(FAMILY, UPDATE_WORKFLOW_STATUS)
            .param(PARAM_WORKFLOW_INSTANCE_ID, instance)
            .param(PARAM_EXECUTION_STATUS, status.state.as_str());
        if let Some(updated_at) = status.updated_at {
            request = request.param(
                PARAM_STATUS_UPDATE_TIME,
                updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        self.accessor.post_form(request).await
    }

    async fn read_optional(&self, path: &str, id: &str) -> RegistryResult<Option<String>> {
        self.accessor
            .get_optional_text(ResourceRequest::read(FAMILY, path).param(PARAM_EXPERIMENT_ID, id))
            .await
    }
}
