//! Lazy password providers.
//!
//! A provider is consulted only after the registry answers `401`, never on
//! the happy path. Implementations may block on a human, so the accessor
//! awaits them on the calling task.

use std::fmt::{self, Debug, Formatter};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};

use crate::error::{CredentialError, CredentialResult};

/// Supplies the secret for a username on demand.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the secret for `username`.
    async fn password(&self, username: &str) -> CredentialResult<String>;
}

/// Provider returning a fixed secret.
#[derive(Clone)]
pub struct StaticCredentials {
    secret: String,
}

impl StaticCredentials {
    /// Wraps `secret`.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Debug for StaticCredentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StaticCredentials")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn password(&self, username: &str) -> CredentialResult<String> {
        if self.secret.is_empty() {
            return Err(CredentialError::Missing {
                username: username.to_string(),
            });
        }
        Ok(self.secret.clone())
    }
}

/// Provider reading the secret from an environment variable at lookup time.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    variable: String,
}

impl EnvCredentials {
    /// Reads from `variable` when a secret is requested.
    #[must_use]
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentials {
    async fn password(&self, _username: &str) -> CredentialResult<String> {
        std::env::var(&self.variable)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CredentialError::Environment {
                variable: self.variable.clone(),
            })
    }
}

/// Builds an HTTP Basic `Authorization` header value.
#[must_use]
pub fn basic_authorization(username: &str, password: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn basic_authorization_encodes_user_and_password() {
        assert_eq!(
            basic_authorization("admin", "admin"),
            "Basic YWRtaW46YWRtaW4="
        );
    }

    #[tokio::test]
    async fn static_credentials_return_secret() -> Result<()> {
        let provider = StaticCredentials::new("s3cret");
        assert_eq!(provider.password("admin").await?, "s3cret");
        assert!(!format!("{provider:?}").contains("s3cret"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_static_secret_is_missing() {
        let provider = StaticCredentials::new("");
        let err = provider.password("admin").await.err();
        assert!(matches!(err, Some(CredentialError::Missing { username }) if username == "admin"));
    }

    #[tokio::test]
    async fn env_credentials_report_unset_variable() {
        let provider = EnvCredentials::new("AIRAVATA_TEST_SECRET_THAT_IS_NEVER_SET");
        let err = provider.password("admin").await.err();
        assert!(matches!(
            err,
            Some(CredentialError::Environment { variable })
                if variable == "AIRAVATA_TEST_SECRET_THAT_IS_NEVER_SET"
        ));
    }
}
