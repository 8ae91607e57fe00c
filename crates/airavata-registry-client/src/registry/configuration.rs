//! Configuration registry: expiring key/value entries.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::accessor::{ResourceAccessor, ResourceFamily, ResourceRequest};
use crate::error::RegistryResult;

const FAMILY: ResourceFamily = ResourceFamily::Configuration;

const GET_CONFIGURATION: &str = "get/configuration";
const SAVE_CONFIGURATION: &str = "save/configuration";
const ADD_CONFIGURATION: &str = "add/configuration";
const DELETE_CONFIGURATION: &str = "delete/configuration";
const DELETE_ALL_CONFIGURATION: &str = "delete/allconfiguration";

const PARAM_KEY: &str = "key";
const PARAM_VALUE: &str = "value";
const PARAM_DATE: &str = "date";

/// Client for configuration entries.
#[derive(Debug, Clone)]
pub struct ConfigurationRegistry {
    accessor: Arc<ResourceAccessor>,
}

impl ConfigurationRegistry {
    pub(crate) const fn new(accessor: Arc<ResourceAccessor>) -> Self {
        Self { accessor }
    }

    /// Value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn get_configuration(&self, key: &str) -> RegistryResult<Option<String>> {
        self.accessor
            .get_optional_text(ResourceRequest::read(FAMILY, GET_CONFIGURATION).param(PARAM_KEY, key))
            .await
    }

    /// Replaces every value under `key` with `value`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn set_configuration(
        &self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> RegistryResult<()> {
        self.accessor
            .post_form(entry(SAVE_CONFIGURATION, key, value, expires_at))
            .await
    }

    /// Adds `value` alongside any existing values under `key`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn add_configuration(
        &self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> RegistryResult<()> {
        self.accessor
            .post_form(entry(ADD_CONFIGURATION, key, value, expires_at))
            .await
    }

    /// Removes one `value` from under `key`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn remove_configuration(&self, key: &str, value: &str) -> RegistryResult<()> {
        self.accessor
            .delete(
                ResourceRequest::delete(FAMILY, DELETE_CONFIGURATION)
                    .param(PARAM_KEY, key)
                    .param(PARAM_VALUE, value),
            )
            .await
    }

    /// Removes every value under `key`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::RegistryError`] from the call.
    pub async fn remove_all_configuration(&self, key: &str) -> RegistryResult<()> {
        self.accessor
            .delete(ResourceRequest::delete(FAMILY, DELETE_ALL_CONFIGURATION).param(PARAM_KEY, key))
            .await
    }
}

fn entry(path: &str, key: &str, value: &str, expires_at: DateTime<Utc>) -> ResourceRequest {
    ResourceRequest::write(FAMILY, path)
        .param(PARAM_KEY, key)
        .param(PARAM_VALUE, value)
        .param(PARAM_DATE, expires_at.to_rfc3339_opts(SecondsFormat::Secs, true))
}
