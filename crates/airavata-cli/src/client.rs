//! Registry wiring, password prompting, and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use airavata_registry_client::{
    ConfigError, CredentialError, CredentialProvider, CredentialResult, EnvCredentials,
    RegistryClient, RegistryConfig, RegistryError, StaticCredentials,
};
use anyhow::anyhow;
use async_trait::async_trait;
use url::Url;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<RegistryError> for CliError {
    fn from(error: RegistryError) -> Self {
        classify_registry_error(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::validation(format!("{error:#}"))
    }
}

/// Connection options gathered from flags and environment.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionSettings {
    pub(crate) registry_url: Url,
    pub(crate) username: String,
    pub(crate) password: Option<String>,
    pub(crate) password_env: Option<String>,
    pub(crate) timeout: Duration,
}

/// Application context passed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) registry: RegistryClient,
}

impl AppContext {
    /// Builds a registry client from the CLI connection settings.
    pub(crate) fn connect(settings: ConnectionSettings) -> CliResult<Self> {
        let config = RegistryConfig::new(settings.registry_url, settings.username)
            .with_timeout(settings.timeout);
        config.validate()?;
        Self::with_credentials(&config, credentials_for(settings.password, settings.password_env))
    }

    pub(crate) fn with_credentials(
        config: &RegistryConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> CliResult<Self> {
        Ok(Self {
            registry: RegistryClient::new(config, credentials)?,
        })
    }
}

/// Picks the password source. An explicit value wins, then a named
/// environment variable read at challenge time, then the terminal prompt.
pub(crate) fn credentials_for(
    password: Option<String>,
    password_env: Option<String>,
) -> Arc<dyn CredentialProvider> {
    if let Some(secret) = password.filter(|value| !value.is_empty()) {
        return Arc::new(StaticCredentials::new(secret));
    }
    match password_env.filter(|name| !name.trim().is_empty()) {
        Some(variable) => Arc::new(EnvCredentials::new(variable)),
        None => Arc::new(PromptCredentials),
    }
}

/// Reads the password from the controlling terminal on demand.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PromptCredentials;

#[async_trait]
impl CredentialProvider for PromptCredentials {
    async fn password(&self, username: &str) -> CredentialResult<String> {
        if !io::stdin().is_terminal() {
            return Err(CredentialError::Missing {
                username: username.to_string(),
            });
        }

        let prompt = format!("Registry password for {username}: ");
        let entered = tokio::task::spawn_blocking(move || rpassword::prompt_password(prompt))
            .await
            .map_err(|err| CredentialError::Prompt {
                source: io::Error::other(err),
            })?
            .map_err(|source| CredentialError::Prompt { source })?;

        if entered.is_empty() {
            return Err(CredentialError::Missing {
                username: username.to_string(),
            });
        }
        Ok(entered)
    }
}

/// Parse the registry URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Classify a registry failure into a CLI error.
pub(crate) fn classify_registry_error(error: RegistryError) -> CliError {
    match error {
        RegistryError::RemoteCall { path, status, body } => {
            let message = body
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty());
            match status {
                204 | 404 => CliError::validation(format!("no registry entry at {path}")),
                400 | 409 | 422 => CliError::validation(message.map_or_else(
                    || format!("registry rejected the request (status {status})"),
                    str::to_string,
                )),
                401 => CliError::failure(anyhow!(
                    "registry rejected the supplied credentials (status 401)"
                )),
                _ => CliError::failure(message.map_or_else(
                    || anyhow!("request failed with status {status}"),
                    |text| anyhow!("{text} (status {status})"),
                )),
            }
        }
        RegistryError::Credential {
            source: CredentialError::Missing { username },
            ..
        } => CliError::validation(format!(
            "password for '{username}' required; supply via --password or \
             AIRAVATA_REGISTRY_PASSWORD when running non-interactively"
        )),
        RegistryError::Credential {
            source: CredentialError::Environment { variable },
            ..
        } => CliError::validation(format!(
            "environment variable {variable} named by --password-env is unset or empty"
        )),
        other => CliError::failure(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn remote(status: u16, body: Option<&str>) -> RegistryError {
        RegistryError::RemoteCall {
            path: "projectregistry/get/project".to_string(),
            status,
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn client_errors_are_validation_failures() {
        let err = classify_registry_error(remote(409, Some("Project already exists\n")));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "Project already exists");
    }

    #[test]
    fn missing_entries_are_validation_failures() {
        let err = classify_registry_error(remote(204, None));
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("projectregistry/get/project"));
    }

    #[test]
    fn server_errors_are_operational_failures() {
        let err = classify_registry_error(remote(500, Some("boom")));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "boom (status 500)");

        let err = classify_registry_error(remote(503, None));
        assert_eq!(err.display_message(), "request failed with status 503");
    }

    #[test]
    fn rejected_credentials_are_operational_failures() {
        let err = classify_registry_error(remote(401, Some("denied")));
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("credentials"));
    }

    #[test]
    fn missing_password_asks_for_flag() {
        let err = classify_registry_error(RegistryError::Credential {
            username: "admin".to_string(),
            source: CredentialError::Missing {
                username: "admin".to_string(),
            },
        });
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("--password"));
    }

    #[test]
    fn parse_url_rejects_invalid_input() {
        let err = parse_url("not a url").err().unwrap_or_default();
        assert!(err.contains("invalid URL"));
    }

    #[tokio::test]
    async fn explicit_password_is_used_verbatim() -> Result<()> {
        let provider = credentials_for(
            Some("s3cret".to_string()),
            Some("AIRAVATA_CLI_TEST_UNSET_SECRET".to_string()),
        );
        assert_eq!(provider.password("admin").await?, "s3cret");
        Ok(())
    }

    #[tokio::test]
    async fn password_env_is_read_only_on_demand() {
        let provider = credentials_for(None, Some("AIRAVATA_CLI_TEST_UNSET_SECRET".to_string()));
        let err = provider.password("admin").await.err();
        assert!(matches!(
            err,
            Some(CredentialError::Environment { ref variable })
                if variable == "AIRAVATA_CLI_TEST_UNSET_SECRET"
        ));
    }

    #[test]
    fn unset_env_credentials_ask_for_password_env() {
        let err = classify_registry_error(RegistryError::Credential {
            username: "admin".to_string(),
            source: CredentialError::Environment {
                variable: "REGISTRY_SECRET".to_string(),
            },
        });
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("REGISTRY_SECRET"));
    }

    #[test]
    fn invalid_settings_are_validation_failures() -> Result<()> {
        let err = AppContext::connect(ConnectionSettings {
            registry_url: "http://127.0.0.1:8080/airavata-registry/api/".parse()?,
            username: "  ".to_string(),
            password: None,
            password_env: None,
            timeout: Duration::from_secs(5),
        })
        .err()
        .map(|err| err.exit_code());
        assert_eq!(err, Some(2));
        Ok(())
    }
}
