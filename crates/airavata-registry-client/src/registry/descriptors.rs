//! Descriptor registry. Descriptor documents are passed through as opaque text.

use std::sync::Arc;

use crate::accessor::{ResourceAccessor, ResourceFamily, ResourceRequest};
use crate::error::RegistryResult;
use crate::models::DescriptorKind;

const FAMILY: ResourceFamily = ResourceFamily::Descriptor;

const PARAM_DOCUMENT: &str = "descriptor";

/// Client for host, service and application descriptors.
#[derive(Debug, Clone)]
pub struct DescriptorRegistry {
    accessor: Arc<ResourceAccessor>,
}

impl DescriptorRegistry {
    pub(crate) const fn new(accessor: Arc<ResourceAccessor>) -> Self {
        Self { accessor }
    }

    /// Whether a descriptor of `kind` named `name` exists.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn descriptor_exists(&self, kind: DescriptorKind, name: &str) -> RegistryResult<bool> {
        self.accessor
            .get_flag(
                ResourceRequest::read(FAMILY, format!("{}/exist", kind.segment()))
                    .param(kind.name_param(), name),
            )
            .await
    }

    /// Descriptor document of `kind` named `name`, if present.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_descriptor(
        &self,
        kind: DescriptorKind,
        name: &str,
    ) -> RegistryResult<Option<String>> {
        self.accessor
            .get_optional_text(
                ResourceRequest::read(FAMILY, format!("get/{}", kind.segment()))
                    .param(kind.name_param(), name),
            )
            .await
    }

    /// Stores a new descriptor document.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn add_descriptor(
        &self,
        kind: DescriptorKind,
        name: &str,
        document: &str,
    ) -> RegistryResult<()> {
        self.accessor
            .post_form(document_request("add", kind, name, document))
            .await
    }

    /// Replaces an existing descriptor document.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn update_descriptor(
        &self,
        kind: DescriptorKind,
        name: &str,
        document: &str,
    ) -> RegistryResult<()> {
        self.accessor
            .post_form(document_request("update", kind, name, document))
            .await
    }

    /// Deletes the descriptor of `kind` named `name`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn remove_descriptor(&self, kind: DescriptorKind, name: &str) -> RegistryResult<()> {
        self.accessor
            .delete(
                ResourceRequest::delete(FAMILY, format!("delete/{}", kind.segment()))
                    .param(kind.name_param(), name),
            )
            .await
    }

    /// Names of every descriptor of `kind`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn descriptor_names(&self, kind: DescriptorKind) -> RegistryResult<Vec<String>> {
        Ok(self
            .accessor
            .get_optional_json(ResourceRequest::read(
                FAMILY,
                format!("get/{}/names", kind.segment()),
            ))
            .await?
            .unwrap_or_default())
    }
}

fn document_request(
    action: &str,
    kind: DescriptorKind,
    name: &str,
    document: &str,
) -> ResourceRequest {
    ResourceRequest::write(FAMILY, format!("{action}/{}", kind.segment()))
        .param(kind.name_param(), name)
        .param(PARAM_DOCUMENT, document)
}
