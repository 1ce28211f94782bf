//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::domain::RequestContext;
use crate::domain::ports::{UsersCommand, UsersQuery};

/// Deadline applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Driving port for mutations.
    pub users_command: Arc<dyn UsersCommand>,
    /// Driving port for lookups.
    pub users_query: Arc<dyn UsersQuery>,
    request_timeout: Duration,
    shutdown: CancellationToken,
}

impl HttpState {
    /// Bundle the user ports with the default request timeout and a fresh
    /// shutdown token.
    #[must_use]
    pub fn new(users_command: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self {
            users_command,
            users_query,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown: CancellationToken::new(),
        }
    }

    /// Override the per-request deadline.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Tie request contexts to a server-wide token; cancelling it aborts
    /// in-flight storage calls.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Deadline given to each request context.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Fresh context for one request: configured deadline, child of the
    /// shutdown token.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.request_timeout, self.shutdown.child_token())
    }
}
