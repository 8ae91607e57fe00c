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

//! Telemetry primitives shared across the Airavata registry workspace.
//!
//! Layout: `init.rs` (subscriber installation and log format selection),
//! `context.rs` (per-command request context), `error.rs` (error types).

pub mod context;
pub mod error;
pub mod init;

pub use context::{CommandContext, current_context, with_request_context};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
