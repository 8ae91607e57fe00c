//! Error types for registry client operations.

use std::io;

use thiserror::Error;

/// Result alias for registry calls.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result alias for credential lookups.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Failure raised by a registry call.
///
/// A rejected retry surfaces as [`RegistryError::RemoteCall`] with status
/// `401`, the same shape as any other terminal status.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry answered with a terminal status.
    #[error("remote call failed with status {status}")]
    RemoteCall {
        /// Resource path relative to the registry base URL.
        path: String,
        /// HTTP status code returned by the registry.
        status: u16,
        /// Response body, when the registry sent one.
        body: Option<String>,
    },
    /// The request never produced a response (connect failure, timeout, broken body).
    #[error("request to registry failed")]
    Transport {
        /// Resource path relative to the registry base URL.
        path: String,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },
    /// The resource path could not be joined onto the base URL.
    #[error("invalid resource path")]
    InvalidPath {
        /// Offending resource path.
        path: String,
        /// URL parsing error.
        source: url::ParseError,
    },
    /// The credential provider could not supply a secret.
    #[error("credential lookup failed")]
    Credential {
        /// Username the secret was requested for.
        username: String,
        /// Provider error.
        source: CredentialError,
    },
    /// A JSON payload did not match the expected shape.
    #[error("failed to decode registry payload")]
    Decode {
        /// Resource path relative to the registry base URL.
        path: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// A plain-text payload held an unexpected value.
    #[error("unexpected registry payload")]
    UnexpectedPayload {
        /// Resource path relative to the registry base URL.
        path: String,
        /// Payload as received.
        body: String,
    },
    /// A header value contained bytes that HTTP does not allow.
    #[error("invalid header value")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
    },
}

impl RegistryError {
    /// HTTP status attached to a terminal remote failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteCall { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the registry rejected the call as unauthorized, including a
    /// rejected credential retry.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::RemoteCall { status: 401, .. })
    }

    /// Response body captured for diagnostics.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::RemoteCall { body, .. } => body.as_deref(),
            Self::UnexpectedPayload { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Resource path the failing call targeted, when known.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::RemoteCall { path, .. }
            | Self::Transport { path, .. }
            | Self::InvalidPath { path, .. }
            | Self::Decode { path, .. }
            | Self::UnexpectedPayload { path, .. } => Some(path.as_str()),
            Self::Credential { .. } | Self::InvalidHeader { .. } => None,
        }
    }
}

/// Failure raised by a credential provider.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No secret is available for the user.
    #[error("no secret available")]
    Missing {
        /// Username the secret was requested for.
        username: String,
    },
    /// Reading the secret from an interactive prompt failed.
    #[error("failed to read secret from prompt")]
    Prompt {
        /// Underlying IO error.
        source: io::Error,
    },
    /// The environment variable holding the secret is unset or not unicode.
    #[error("secret environment variable not set")]
    Environment {
        /// Variable name.
        variable: String,
    },
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL cannot host registry resource paths.
    #[error("invalid registry base URL")]
    InvalidBaseUrl {
        /// Offending URL.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// The username is blank.
    #[error("registry username must not be empty")]
    EmptyUsername,
    /// The request timeout is zero.
    #[error("request timeout must be greater than zero")]
    InvalidTimeout,
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },
}
