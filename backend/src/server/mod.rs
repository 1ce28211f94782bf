//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

#[cfg(debug_assertions)]
use user_service::doc::ApiDoc;
use user_service::domain::UserService;
use user_service::inbound::http::api_scope;
use user_service::inbound::http::health::{HealthState, health, live, ready};
use user_service::inbound::http::state::HttpState;
use user_service::middleware::{CorsOrigins, Trace, cors};
use user_service::outbound::persistence::DieselUserRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_http_state(config: &ServerConfig) -> HttpState {
    let repository = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let service = Arc::new(UserService::new(repository, Arc::new(DefaultClock)));
    HttpState::new(service.clone(), service)
        .with_request_timeout(config.request_timeout)
        .with_shutdown(config.shutdown.clone())
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_origins: &CorsOrigins,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors(cors_origins))
        .wrap(Trace)
        .service(api_scope())
        .service(health)
        .service(ready)
        .service(live)
        .configure(register_docs)
}

fn register_docs(cfg: &mut web::ServiceConfig) {
    #[cfg(debug_assertions)]
    cfg.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    #[cfg(not(debug_assertions))]
    let _ = cfg;
}

/// Construct the Actix HTTP server.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness
/// is flipped once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        cors_origins,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            &cors_origins,
        )
    })
    .bind(bind_addr)?
    .disable_signals()
    .run();

    info!(addr = %bind_addr, "http server listening");
    health_state.mark_ready();
    Ok(server)
}
