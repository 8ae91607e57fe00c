//! Error types for telemetry operations.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised while configuring logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log level directive")]
    InvalidLevel {
        /// Directive as configured.
        level: String,
        /// Parser error from the filter.
        source: ParseError,
    },
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        source: TryInitError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn invalid_level_keeps_directive_and_source() {
        let Err(source) = EnvFilter::try_new("registry=verbose") else {
            panic!("directive should be rejected");
        };
        let err = TelemetryError::InvalidLevel {
            level: "registry=verbose".into(),
            source,
        };
        assert_eq!(err.to_string(), "invalid log level directive");
        assert!(err.source().is_some());
    }
}
