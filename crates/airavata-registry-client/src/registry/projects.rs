//! Project registry.

use std::sync::Arc;

use crate::accessor::{ResourceAccessor, ResourceFamily, ResourceRequest};
use crate::error::RegistryResult;
use crate::models::Project;

const FAMILY: ResourceFamily = ResourceFamily::Project;

const PROJECT_EXISTS: &str = "project/exist";
const ADD_PROJECT: &str = "add/project";
const UPDATE_PROJECT: &str = "update/project";
const DELETE_PROJECT: &str = "delete/project";
const GET_PROJECT: &str = "get/project";
const GET_PROJECTS: &str = "get/projects";

const PARAM_PROJECT_NAME: &str = "projectName";

/// Client for project records.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    accessor: Arc<ResourceAccessor>,
}

impl ProjectRegistry {
    pub(crate) const fn new(accessor: Arc<ResourceAccessor>) -> Self {
        Self { accessor }
    }

    /// Whether a project named `name` exists.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn project_exists(&self, name: &str) -> RegistryResult<bool> {
        self.accessor
            .get_flag(ResourceRequest::read(FAMILY, PROJECT_EXISTS).param(PARAM_PROJECT_NAME, name))
            .await
    }

    /// Registers a new project.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn add_project(&self, project: &Project) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(FAMILY, ADD_PROJECT)
                    .param(PARAM_PROJECT_NAME, project.name.as_str()),
            )
            .await
    }

    /// Updates an existing project.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn update_project(&self, project: &Project) -> RegistryResult<()> {
        self.accessor
            .post_form(
                ResourceRequest::write(FAMILY, UPDATE_PROJECT)
                    .param(PARAM_PROJECT_NAME, project.name.as_str()),
            )
            .await
    }

    /// Deletes the project named `name`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn delete_project(&self, name: &str) -> RegistryResult<()> {
        self.accessor
            .delete(ResourceRequest::delete(FAMILY, DELETE_PROJECT).param(PARAM_PROJECT_NAME, name))
            .await
    }

    /// Fetches the project named `name`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_project(&self, name: &str) -> RegistryResult<Project> {
        self.accessor
            .get_json(ResourceRequest::read(FAMILY, GET_PROJECT).param(PARAM_PROJECT_NAME, name))
            .await
    }

    /// Lists every project.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_projects(&self) -> RegistryResult<Vec<Project>> {
        Ok(self
            .accessor
            .get_optional_json(ResourceRequest::read(FAMILY, GET_PROJECTS))
            .await?
            .unwrap_or_default())
    }
}
