//! Per-command context shared with outgoing registry calls.
//!
//! The CLI opens one context per command. Registry calls made inside it stamp
//! `x-request-id` from the context and label their spans with the command
//! that issued them.

use std::future::Future;
use std::sync::Arc;

use tracing::Span;
use tracing::field::display;

/// Identifiers of the command currently running on this task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    request_id: Arc<str>,
    operation: Arc<str>,
}

impl CommandContext {
    /// Creates a context for one command invocation.
    #[must_use]
    pub fn new(request_id: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            request_id: Arc::from(request_id.into()),
            operation: Arc::from(operation.into()),
        }
    }

    /// Correlation id forwarded to the registry.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Command label, e.g. `project_get`.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Fills the `request_id` and `operation` fields of `span`.
    ///
    /// Fields the span did not declare are left alone.
    pub fn record_on(&self, span: &Span) {
        span.record("request_id", display(&self.request_id));
        span.record("operation", display(&self.operation));
    }
}

/// Context of the command running on the current task, if any.
#[must_use]
pub fn current_context() -> Option<CommandContext> {
    ACTIVE_COMMAND.try_with(Clone::clone).ok()
}

/// Runs `fut` with a fresh [`CommandContext`] visible to every registry call it makes.
pub async fn with_request_context<Fut, T>(
    request_id: impl Into<String>,
    operation: impl Into<String>,
    fut: Fut,
) -> T
where
    Fut: Future<Output = T>,
{
    ACTIVE_COMMAND
        .scope(CommandContext::new(request_id, operation), fut)
        .await
}

tokio::task_local! {
    static ACTIVE_COMMAND: CommandContext;
}
