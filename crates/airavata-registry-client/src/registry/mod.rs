//! Thin clients for each registry resource family.
//!
//! Each family client only names paths and decodes payloads; the
//! authentication protocol lives entirely in [`ResourceAccessor`].

use std::sync::Arc;

use crate::accessor::ResourceAccessor;
use crate::config::RegistryConfig;
use crate::credentials::CredentialProvider;
use crate::error::ConfigResult;
use crate::session::SessionStore;

mod configuration;
mod descriptors;
mod experiments;
mod projects;
mod provenance;
mod workflows;

pub use configuration::ConfigurationRegistry;
pub use descriptors::DescriptorRegistry;
pub use experiments::ExperimentRegistry;
pub use projects::ProjectRegistry;
pub use provenance::ProvenanceRegistry;
pub use workflows::{PublishedWorkflowRegistry, UserWorkflowRegistry};

/// Entry point handing out family clients that share one session.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    accessor: Arc<ResourceAccessor>,
}

impl RegistryClient {
    /// Creates a client with a fresh session.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` is invalid.
    pub fn new(
        config: &RegistryConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> ConfigResult<Self> {
        Ok(Self::from_accessor(ResourceAccessor::new(
            config,
            credentials,
        )?))
    }

    /// Creates a client that joins an existing session.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` is invalid.
    pub fn with_session(
        config: &RegistryConfig,
        credentials: Arc<dyn CredentialProvider>,
        session: SessionStore,
    ) -> ConfigResult<Self> {
        Ok(Self::from_accessor(ResourceAccessor::with_session(
            config,
            credentials,
            session,
        )?))
    }

    /// Wraps an already constructed accessor.
    #[must_use]
    pub fn from_accessor(accessor: ResourceAccessor) -> Self {
        Self {
            accessor: Arc::new(accessor),
        }
    }

    /// Underlying accessor.
    #[must_use]
    pub fn accessor(&self) -> &ResourceAccessor {
        &self.accessor
    }

    /// Session shared by every family client.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.accessor.session()
    }

    /// Configuration entries.
    #[must_use]
    pub fn configuration(&self) -> ConfigurationRegistry {
        ConfigurationRegistry::new(Arc::clone(&self.accessor))
    }

    /// Host, service and application descriptors.
    #[must_use]
    pub fn descriptors(&self) -> DescriptorRegistry {
        DescriptorRegistry::new(Arc::clone(&self.accessor))
    }

    /// Projects.
    #[must_use]
    pub fn projects(&self) -> ProjectRegistry {
        ProjectRegistry::new(Arc::clone(&self.accessor))
    }

    /// Experiments.
    #[must_use]
    pub fn experiments(&self) -> ExperimentRegistry {
        ExperimentRegistry::new(Arc::clone(&self.accessor))
    }

    /// Execution provenance.
    #[must_use]
    pub fn provenance(&self) -> ProvenanceRegistry {
        ProvenanceRegistry::new(Arc::clone(&self.accessor))
    }

    /// Per-user workflow graphs.
    #[must_use]
    pub fn user_workflows(&self) -> UserWorkflowRegistry {
        UserWorkflowRegistry::new(Arc::clone(&self.accessor))
    }

    /// Published workflow graphs.
    #[must_use]
    pub fn published_workflows(&self) -> PublishedWorkflowRegistry {
        PublishedWorkflowRegistry::new(Arc::clone(&self.accessor))
    }
}
