#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Client for the Airavata registry REST service.
//!
//! Every call goes through [`ResourceAccessor`], which sends the request
//! without credentials first, retries exactly once with HTTP Basic
//! authentication when the registry answers `401`, and replays the session
//! cookie the registry hands back on later calls.
//!
//! Layout: `accessor.rs` (request descriptor and the authenticated call),
//! `session.rs` (session cookie storage), `credentials.rs` (lazy password
//! providers), `config.rs` (client configuration), `registry/` (thin
//! per-family clients), `models.rs` (payload carriers), `error.rs`.

pub mod accessor;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod registry;
pub mod session;

pub use accessor::{MediaType, RequestMethod, ResourceAccessor, ResourceFamily, ResourceRequest};
pub use config::{DEFAULT_TIMEOUT, RegistryConfig, USER_AGENT};
pub use credentials::{
    CredentialProvider, EnvCredentials, StaticCredentials, basic_authorization,
};
pub use error::{
    ConfigError, ConfigResult, CredentialError, CredentialResult, RegistryError, RegistryResult,
};
pub use models::{DescriptorKind, ExecutionState, Experiment, Project, WorkflowInstanceStatus};
pub use registry::{
    ConfigurationRegistry, DescriptorRegistry, ExperimentRegistry, ProjectRegistry,
    ProvenanceRegistry, PublishedWorkflowRegistry, RegistryClient, UserWorkflowRegistry,
};
pub use session::{SessionStore, SessionToken};
