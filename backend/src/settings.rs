//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from defaults, a configuration file, `USER_SERVICE_*`
//! environment variables and command-line flags, later layers winning.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::CorsOrigins;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// Problems with otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was supplied through any layer.
    #[error("database_url is required (set USER_SERVICE_DATABASE_URL)")]
    MissingDatabaseUrl,
    /// The bind address is not `host:port`.
    #[error("invalid bind_addr {value:?}: {message}")]
    InvalidBindAddr {
        /// The configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The pool must allow at least one connection.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
    /// A zero deadline would fail every request.
    #[error("request_timeout_ms must be greater than zero")]
    ZeroRequestTimeout,
    /// An entry in the CORS origin list is not `scheme://host[:port]`.
    #[error("invalid cors_allowed_origins entry {value:?}")]
    InvalidCorsOrigin {
        /// The offending entry.
        value: String,
    },
}

/// Runtime settings for the user service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct Settings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Per-request deadline in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Apply pending migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
    /// Comma-separated browser origins allowed by CORS. Unset or `*` allows
    /// any origin.
    pub cors_allowed_origins: Option<String>,
}

impl Settings {
    /// Configured database URL.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Listening address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Pool size, defaulting to ten connections.
    ///
    /// # Errors
    /// Returns [`SettingsError::EmptyPool`] for zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// Whether to migrate the schema on startup, defaulting to `true`.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// CORS origin policy, defaulting to any origin.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidCorsOrigin`] for a malformed entry.
    pub fn cors_origins(&self) -> Result<CorsOrigins, SettingsError> {
        self.cors_allowed_origins
            .as_deref()
            .map_or(Ok(CorsOrigins::Any), CorsOrigins::parse)
            .map_err(|err| SettingsError::InvalidCorsOrigin { value: err.origin })
    }

    /// Request deadline, defaulting to five seconds.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroRequestTimeout`] for zero.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS) {
            0 => Err(SettingsError::ZeroRequestTimeout),
            millis => Ok(Duration::from_millis(millis)),
        }
    }
}
