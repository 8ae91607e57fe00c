//! Client configuration for the registry connection.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::{ConfigError, ConfigResult};

/// Timeout applied to every registry round trip unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with every registry request.
pub const USER_AGENT: &str = concat!("airavata-registry-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings shared by all registry families.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Root URI of the registry API; always ends with `/`.
    pub base_url: Url,
    /// Username presented when the registry demands authentication.
    pub username: String,
    /// Timeout applied to the initial request and to the retry.
    pub timeout: Duration,
    /// User agent header value.
    pub user_agent: String,
}

impl RegistryConfig {
    /// Creates a configuration with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: Url, username: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url),
            username: username.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Parses the base URL and creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when `base_url` does not parse,
    /// or any error reported by [`RegistryConfig::validate`].
    pub fn parse(base_url: &str, username: impl Into<String>) -> ConfigResult<Self> {
        let url = base_url
            .trim()
            .parse::<Url>()
            .map_err(|_| ConfigError::InvalidBaseUrl {
                value: base_url.to_string(),
                reason: "unparseable",
            })?;
        let config = Self::new(url, username);
        config.validate()?;
        Ok(config)
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks the configuration for values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.base_url.to_string(),
                reason: "cannot_be_a_base",
            });
        }
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.base_url.to_string(),
                reason: "unsupported_scheme",
            });
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Builds the HTTP client used for registry round trips.
    ///
    /// No cookie jar is enabled; session cookies are tracked by the
    /// accessor's session store.
    ///
    /// # Errors
    ///
    /// Returns a validation error or [`ConfigError::HttpClient`] when the
    /// underlying client cannot be constructed.
    pub fn build_http_client(&self) -> ConfigResult<Client> {
        self.validate()?;
        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|source| ConfigError::HttpClient { source })
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.cannot_be_a_base() && !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
