//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use user_service::inbound::http::state::DEFAULT_REQUEST_TIMEOUT;
use user_service::middleware::CorsOrigins;
use user_service::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) request_timeout: Duration,
    pub(crate) shutdown: CancellationToken,
    pub(crate) cors_origins: CorsOrigins,
}

impl ServerConfig {
    /// Serve on `bind_addr`, persisting through `db_pool`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown: CancellationToken::new(),
            cors_origins: CorsOrigins::Any,
        }
    }

    /// Deadline applied to every request's storage calls.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Token whose cancellation aborts in-flight requests.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Origins browsers may call the API from.
    #[must_use]
    pub fn with_cors(mut self, origins: CorsOrigins) -> Self {
        self.cors_origins = origins;
        self
    }
}
