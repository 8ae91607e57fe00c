//! Experiment registry.

use std::sync::Arc;

use crate::accessor::{ResourceAccessor, ResourceFamily, ResourceRequest};
use crate::error::RegistryResult;
use crate::models::Experiment;

const FAMILY: ResourceFamily = ResourceFamily::Experiment;

const EXPERIMENT_EXISTS: &str = "experiment/exist";
const ADD_EXPERIMENT: &str = "add/experiment";
const DELETE_EXPERIMENT: &str = "delete/experiment";
const GET_EXPERIMENT: &str = "get/experiment";
const GET_EXPERIMENTS: &str = "get/experiments";

const PARAM_EXPERIMENT_ID: &str = "experimentId";
const PARAM_PROJECT_NAME: &str = "projectName";
const PARAM_SUBMITTED_USER: &str = "submittedUser";
const PARAM_EXPERIMENT_NAME: &str = "experimentName";

/// Client for experiment records.
#[derive(Debug, Clone)]
pub struct ExperimentRegistry {
    accessor: Arc<ResourceAccessor>,
}

impl ExperimentRegistry {
    pub(crate) const fn new(accessor: Arc<ResourceAccessor>) -> Self {
        Self { accessor }
    }

    /// Whether an experiment with `id` exists.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn experiment_exists(&self, id: &str) -> RegistryResult<bool> {
        self.accessor
            .get_flag(
                ResourceRequest::read(FAMILY, EXPERIMENT_EXISTS).param(PARAM_EXPERIMENT_ID, id),
            )
            .await
    }

    /// Registers `experiment` under `project`.
    ///
    /// The `project` argument wins over `experiment.project`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn add_experiment(&self, project: &str, experiment: &Experiment) -> RegistryResult<()> {
        let mut request = ResourceRequest::write(FAMILY, ADD_EXPERIMENT)
            .param(PARAM_EXPERIMENT_ID, experiment.id.as_str())
            .param(PARAM_PROJECT_NAME, project);
        if let Some(user) = &experiment.submitted_user {
            request = request.param(PARAM_SUBMITTED_USER, user.as_str());
        }
        if let Some(name) = &experiment.name {
            request = request.param(PARAM_EXPERIMENT_NAME, name.as_str());
        }
        self.accessor.post_form(request).await
    }

    /// Removes the experiment with `id`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn remove_experiment(&self, id: &str) -> RegistryResult<()> {
        self.accessor
            .delete(ResourceRequest::delete(FAMILY, DELETE_EXPERIMENT).param(PARAM_EXPERIMENT_ID, id))
            .await
    }

    /// Fetches the experiment with `id`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_experiment(&self, id: &str) -> RegistryResult<Experiment> {
        self.accessor
            .get_json(ResourceRequest::read(FAMILY, GET_EXPERIMENT).param(PARAM_EXPERIMENT_ID, id))
            .await
    }

    /// Lists experiments, optionally restricted to one project.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_experiments(&self, project: Option<&str>) -> RegistryResult<Vec<Experiment>> {
        let mut request = ResourceRequest::read(FAMILY, GET_EXPERIMENTS);
        if let Some(project) = project {
            request = request.param(PARAM_PROJECT_NAME, project);
        }
        Ok(self
            .accessor
            .get_optional_json(request)
            .await?
            .unwrap_or_default())
    }
}
