//! Authenticated access to registry resources.
//!
//! # Design
//! - Every call starts without credentials, presenting the stored session
//!   cookie when one exists.
//! - A `401` triggers exactly one retry carrying HTTP Basic credentials. The
//!   password is requested from the [`CredentialProvider`] only at that point.
//! - A `200` stores any `Set-Cookie` token, replacing the previous one.
//! - `204` is an empty result only for requests that opt into it.
//! - Every other status is terminal and never retried.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE, HeaderValue, SET_COOKIE};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{Span, debug, field, instrument, warn};

use crate::config::RegistryConfig;
use crate::credentials::{CredentialProvider, basic_authorization};
use crate::error::{ConfigResult, RegistryError, RegistryResult};
use crate::session::{SessionStore, SessionToken};

const HEADER_REQUEST_ID: &str = "x-request-id";

/// Kind of remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    /// `GET` with query parameters.
    Read,
    /// `POST` with a form-encoded body.
    Write,
    /// `DELETE` with query parameters.
    Delete,
}

impl RequestMethod {
    fn http(self) -> Method {
        match self {
            Self::Read => Method::GET,
            Self::Write => Method::POST,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Media type requested through the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// `text/plain`
    TextPlain,
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
}

impl MediaType {
    /// MIME string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextPlain => "text/plain",
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

/// Resource family exposed by the registry, each rooted at its own sub-path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFamily {
    /// Key/value configuration entries.
    Configuration,
    /// Host, service and application descriptors.
    Descriptor,
    /// Projects.
    Project,
    /// Experiments.
    Experiment,
    /// Execution provenance.
    Provenance,
    /// Per-user workflow graphs.
    UserWorkflow,
    /// Published workflow graphs.
    PublishedWorkflow,
}

impl ResourceFamily {
    /// Path segment under the registry base URL.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Configuration => "configurationregistry",
            Self::Descriptor => "descriptorsregistry",
            Self::Project => "projectregistry",
            Self::Experiment => "experimentregistry",
            Self::Provenance => "provenanceregistry",
            Self::UserWorkflow => "userwfregistry",
            Self::PublishedWorkflow => "publishwfregistry",
        }
    }
}

/// One logical registry call.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    method: RequestMethod,
    family: ResourceFamily,
    path: String,
    params: BTreeMap<String, String>,
    accept: MediaType,
    tolerate_no_content: bool,
}

impl ResourceRequest {
    /// Creates a request for `path` under `family`.
    #[must_use]
    pub fn new(method: RequestMethod, family: ResourceFamily, path: impl Into<String>) -> Self {
        Self {
            method,
            family,
            path: path.into().trim_start_matches('/').to_string(),
            params: BTreeMap::new(),
            accept: MediaType::TextPlain,
            tolerate_no_content: false,
        }
    }

    /// Shorthand for a [`RequestMethod::Read`] request.
    #[must_use]
    pub fn read(family: ResourceFamily, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Read, family, path)
    }

    /// Shorthand for a [`RequestMethod::Write`] request.
    #[must_use]
    pub fn write(family: ResourceFamily, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Write, family, path)
    }

    /// Shorthand for a [`RequestMethod::Delete`] request.
    #[must_use]
    pub fn delete(family: ResourceFamily, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Delete, family, path)
    }

    /// Adds a parameter; a repeated key keeps the last value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Adds every pair from `params`.
    #[must_use]
    pub fn params<'a>(mut self, params: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (key, value) in params {
            self.params.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Sets the accepted media type.
    #[must_use]
    pub const fn accept(mut self, media: MediaType) -> Self {
        self.accept = media;
        self
    }

    /// Treats `204 No Content` as an absent value instead of a failure.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.tolerate_no_content = true;
        self
    }

    /// Operation kind.
    #[must_use]
    pub const fn method(&self) -> RequestMethod {
        self.method
    }

    /// Resource family.
    #[must_use]
    pub const fn family(&self) -> ResourceFamily {
        self.family
    }

    /// Path relative to the family root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query or form parameters.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Accepted media type.
    #[must_use]
    pub const fn accept_type(&self) -> MediaType {
        self.accept
    }

    /// Whether `204` yields an absent value.
    #[must_use]
    pub const fn tolerates_no_content(&self) -> bool {
        self.tolerate_no_content
    }

    /// Path relative to the registry base, including the family segment.
    #[must_use]
    pub fn resource_path(&self) -> String {
        format!("{}/{}", self.family.segment(), self.path)
    }
}

/// Credentials attached to a single attempt.
enum Presented<'a> {
    Anonymous,
    Session(&'a SessionToken),
    Basic(&'a str),
}

/// Classified response of a single attempt.
enum Attempt {
    Payload {
        body: String,
        token: Option<SessionToken>,
    },
    NoContent,
    Challenge {
        body: Option<String>,
    },
    Failure {
        status: StatusCode,
        body: Option<String>,
    },
}

/// Executes registry calls with at most one transparent re-authentication.
pub struct ResourceAccessor {
    http: Client,
    base_url: Url,
    username: String,
    credentials: Arc<dyn CredentialProvider>,
    session: SessionStore,
}

impl std::fmt::Debug for ResourceAccessor {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ResourceAccessor")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ResourceAccessor {
    /// Creates an accessor with its own session store.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` is invalid.
    pub fn new(
        config: &RegistryConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> ConfigResult<Self> {
        Self::with_session(config, credentials, SessionStore::new())
    }

    /// Creates an accessor that shares `session` with other clients.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` is invalid.
    pub fn with_session(
        config: &RegistryConfig,
        credentials: Arc<dyn CredentialProvider>,
        session: SessionStore,
    ) -> ConfigResult<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            credentials,
            session,
        })
    }

    /// Session store holding the current cookie.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Username presented on authentication.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Registry base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Executes `request`.
    ///
    /// Returns `Some(body)` on `200` and `None` on a tolerated `204`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RemoteCall`] for any terminal status,
    /// including a `401` on the credential retry, and transport, credential
    /// or header errors as they occur.
    #[instrument(
        name = "registry.request",
        skip(self, request),
        fields(
            method = ?request.method(),
            resource = %request.resource_path(),
            request_id = field::Empty,
            operation = field::Empty
        )
    )]
    pub async fn perform_request(&self, request: &ResourceRequest) -> RegistryResult<Option<String>> {
        if let Some(context) = airavata_telemetry::current_context() {
            context.record_on(&Span::current());
        }
        let url = self.resolve(request)?;
        let presented = self.session.current();
        let credentials = presented
            .as_ref()
            .map_or(Presented::Anonymous, Presented::Session);

        debug!(session = presented.is_some(), "sending registry request");
        let attempt = self.send(request, &url, credentials).await?;
        match attempt {
            Attempt::Payload { body, token } => {
                self.store_token(token);
                Ok(Some(body))
            }
            Attempt::NoContent if request.tolerates_no_content() => {
                debug!("registry returned no content");
                Ok(None)
            }
            Attempt::NoContent => Err(remote_failure(request, StatusCode::NO_CONTENT, None)),
            Attempt::Failure { status, body } => {
                warn!(status = status.as_u16(), "registry call failed");
                Err(remote_failure(request, status, body))
            }
            Attempt::Challenge { .. } => self.reauthenticate(request, &url, presented).await,
        }
    }

    /// Reads a payload that must be present.
    ///
    /// # Errors
    ///
    /// See [`ResourceAccessor::perform_request`].
    pub async fn get_text(&self, request: ResourceRequest) -> RegistryResult<String> {
        let request = request.accept(MediaType::TextPlain);
        self.perform_request(&request)
            .await?
            .ok_or_else(|| remote_failure(&request, StatusCode::NO_CONTENT, None))
    }

    /// Reads a payload that may be absent.
    ///
    /// # Errors
    ///
    /// See [`ResourceAccessor::perform_request`].
    pub async fn get_optional_text(&self, request: ResourceRequest) -> RegistryResult<Option<String>> {
        let request = request.accept(MediaType::TextPlain).optional();
        self.perform_request(&request).await
    }

    /// Reads and decodes a JSON payload.
    ///
    /// # Errors
    ///
    /// See [`ResourceAccessor::perform_request`]; also returns
    /// [`RegistryError::Decode`] when the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, request: ResourceRequest) -> RegistryResult<T> {
        let request = request.accept(MediaType::Json);
        let body = self
            .perform_request(&request)
            .await?
            .ok_or_else(|| remote_failure(&request, StatusCode::NO_CONTENT, None))?;
        decode_json(&request, &body)
    }

    /// Reads and decodes a JSON payload that may be absent.
    ///
    /// # Errors
    ///
    /// See [`ResourceAccessor::get_json`].
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        request: ResourceRequest,
    ) -> RegistryResult<Option<T>> {
        let request = request.accept(MediaType::Json).optional();
        match self.perform_request(&request).await? {
            Some(body) => decode_json(&request, &body).map(Some),
            None => Ok(None),
        }
    }

    /// Reads a `true`/`false` plain-text payload.
    ///
    /// # Errors
    ///
    /// See [`ResourceAccessor::perform_request`]; also returns
    /// [`RegistryError::UnexpectedPayload`] for any other body.
    pub async fn get_flag(&self, request: ResourceRequest) -> RegistryResult<bool> {
        let path = request.resource_path();
        let body = self.get_text(request).await?;
        parse_flag(&body).ok_or_else(|| RegistryError::UnexpectedPayload { path, body })
    }

    /// Sends a form-encoded write.
    ///
    /// # Errors
    ///
    /// See [`ResourceAccessor::perform_request`].
    pub async fn post_form(&self, request: ResourceRequest) -> RegistryResult<()> {
        self.perform_request(&request).await.map(|_| ())
    }

    /// Sends a delete.
    ///
    /// # Errors
    ///
    /// See [`ResourceAccessor::perform_request`].
    pub async fn delete(&self, request: ResourceRequest) -> RegistryResult<()> {
        self.perform_request(&request).await.map(|_| ())
    }

    async fn reauthenticate(
        &self,
        request: &ResourceRequest,
        url: &Url,
        rejected: Option<SessionToken>,
    ) -> RegistryResult<Option<String>> {
        if let Some(token) = rejected.as_ref()
            && self.session.invalidate(token)
        {
            debug!("dropped rejected session token");
        }
        warn!("registry requested authentication; retrying with credentials");

        let password = self
            .credentials
            .password(&self.username)
            .await
            .map_err(|source| RegistryError::Credential {
                username: self.username.clone(),
                source,
            })?;
        let authorization = basic_authorization(&self.username, &password);

        let attempt = self
            .send(request, url, Presented::Basic(&authorization))
            .await?;
        match attempt {
            Attempt::Payload { body, token } => {
                self.store_token(token);
                Ok(Some(body))
            }
            Attempt::Challenge { body } => {
                warn!("registry rejected the supplied credentials");
                Err(remote_failure(request, StatusCode::UNAUTHORIZED, body))
            }
            Attempt::NoContent => Err(remote_failure(request, StatusCode::NO_CONTENT, None)),
            Attempt::Failure { status, body } => {
                warn!(status = status.as_u16(), "authenticated retry failed");
                Err(remote_failure(request, status, body))
            }
        }
    }

    async fn send(
        &self,
        request: &ResourceRequest,
        url: &Url,
        presented: Presented<'_>,
    ) -> RegistryResult<Attempt> {
        let mut builder = self
            .http
            .request(request.method().http(), url.clone())
            .header(ACCEPT, request.accept_type().as_str());

        builder = match request.method() {
            RequestMethod::Write => builder.form(request.parameters()),
            RequestMethod::Read | RequestMethod::Delete => builder.query(request.parameters()),
        };

        if let Some(context) = airavata_telemetry::current_context() {
            let value = HeaderValue::from_str(context.request_id()).map_err(|_| {
                RegistryError::InvalidHeader {
                    name: HEADER_REQUEST_ID,
                }
            })?;
            builder = builder.header(HEADER_REQUEST_ID, value);
        }

        match presented {
            Presented::Anonymous => {}
            Presented::Session(token) => {
                let value = HeaderValue::from_str(token.header_value())
                    .map_err(|_| RegistryError::InvalidHeader { name: "cookie" })?;
                builder = builder.header(COOKIE, value);
            }
            Presented::Basic(authorization) => {
                let mut value = HeaderValue::from_str(authorization)
                    .map_err(|_| RegistryError::InvalidHeader {
                        name: "authorization",
                    })?;
                value.set_sensitive(true);
                builder = builder.header(AUTHORIZATION, value);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|source| RegistryError::Transport {
                path: request.resource_path(),
                source,
            })?;
        classify(request, response).await
    }

    fn resolve(&self, request: &ResourceRequest) -> RegistryResult<Url> {
        let path = request.resource_path();
        self.base_url
            .join(&path)
            .map_err(|source| RegistryError::InvalidPath { path, source })
    }

    fn store_token(&self, token: Option<SessionToken>) {
        if let Some(token) = token {
            debug!(cookie = token.name(), "stored registry session token");
            self.session.replace(token);
        }
    }
}

async fn classify(request: &ResourceRequest, response: Response) -> RegistryResult<Attempt> {
    let status = response.status();
    match status {
        StatusCode::OK => {
            let token = session_token(&response);
            let body = response
                .text()
                .await
                .map_err(|source| RegistryError::Transport {
                    path: request.resource_path(),
                    source,
                })?;
            Ok(Attempt::Payload { body, token })
        }
        StatusCode::NO_CONTENT => Ok(Attempt::NoContent),
        StatusCode::UNAUTHORIZED => Ok(Attempt::Challenge {
            body: read_body(response).await,
        }),
        _ => Ok(Attempt::Failure {
            status,
            body: read_body(response).await,
        }),
    }
}

fn session_token(response: &Response) -> Option<SessionToken> {
    SessionToken::from_set_cookies(
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok()),
    )
}

async fn read_body(response: Response) -> Option<String> {
    response
        .text()
        .await
        .ok()
        .filter(|body| !body.trim().is_empty())
}

fn remote_failure(
    request: &ResourceRequest,
    status: StatusCode,
    body: Option<String>,
) -> RegistryError {
    RegistryError::RemoteCall {
        path: request.resource_path(),
        status: status.as_u16(),
        body,
    }
}

fn decode_json<T: DeserializeOwned>(request: &ResourceRequest, body: &str) -> RegistryResult<T> {
    serde_json::from_str(body).map_err(|source| {
        debug!(resource = %request.resource_path(), "failed to decode registry payload");
        RegistryError::Decode {
            path: request.resource_path(),
            source,
        }
    })
}

fn parse_flag(body: &str) -> Option<bool> {
    let trimmed = body.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
