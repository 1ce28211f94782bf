//! User service entry point: loads settings, prepares the database and serves
//! the REST API until interrupted.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use user_service::settings::Settings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load().map_err(|err| io::Error::other(format!("config: {err}")))?;
    let database_url = settings.database_url().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let request_timeout = settings.request_timeout().map_err(io::Error::other)?;
    let pool_max_size = settings.pool_max_size().map_err(io::Error::other)?;
    let cors_origins = settings.cors_origins().map_err(io::Error::other)?;

    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(pool_max_size))
        .await
        .map_err(io::Error::other)?;

    let shutdown = CancellationToken::new();
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool)
        .with_request_timeout(request_timeout)
        .with_shutdown(shutdown.clone())
        .with_cors(cors_origins);
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();

    actix_web::rt::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown requested");
        health_state.mark_unhealthy();
        shutdown.cancel();
        handle.stop(true).await;
    });

    server.await
}
