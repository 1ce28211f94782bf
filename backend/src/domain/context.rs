//! Per-request cancellation and deadline token.
//!
//! A [`RequestContext`] is created by the inbound adapter for every request and
//! passed by reference through the domain service into the persistence
//! adapters. Nothing about it is ambient: a layer that wants to honour
//! cancellation must be handed the context explicitly.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Reasons a context-bound operation stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The request (or the whole server) was cancelled.
    #[error("request was cancelled")]
    Cancelled,
    /// The request deadline passed before the operation finished.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation and deadline token scoped to one request.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use user_service::domain::RequestContext;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let ctx = RequestContext::with_timeout(Duration::from_secs(1));
/// let value = ctx.run(async { 42 }).await.expect("completes in time");
/// assert_eq!(value, 42);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Instant,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Build a context that expires `timeout` from now and is cancelled
    /// together with `cancellation`.
    #[must_use]
    pub fn new(timeout: Duration, cancellation: CancellationToken) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            cancellation,
        }
    }

    /// Build a standalone context with its own cancellation token.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, CancellationToken::new())
    }

    /// Instant after which context-bound operations fail.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the context has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Cancel this context and every context derived from the same token.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline passes first.
    ///
    /// # Errors
    /// Returns [`ContextError::Cancelled`] or [`ContextError::DeadlineExceeded`]
    /// when `fut` loses the race. `fut` is dropped in that case.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, ContextError>
    where
        F: Future,
    {
        if self.cancellation.is_cancelled() {
            return Err(ContextError::Cancelled);
        }

        tokio::select! {
            biased;
            () = self.cancellation.cancelled() => Err(ContextError::Cancelled),
            outcome = tokio::time::timeout_at(self.deadline, fut) => {
                outcome.map_err(|_| ContextError::DeadlineExceeded)
            }
        }
    }
}
