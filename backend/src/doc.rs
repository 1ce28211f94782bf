//! OpenAPI documentation for the REST API.
//!
//! Served through Swagger UI at `/docs` in debug builds and exported by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::users::{CreateUserBody, MessageResponse, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "Create, fetch and delete users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CreateUserBody, UserResponse, MessageResponse, ErrorBody, HealthStatus)),
    tags(
        (name = "users", description = "User management"),
        (name = "health", description = "Health and orchestration checks")
    )
)]
pub struct ApiDoc;
