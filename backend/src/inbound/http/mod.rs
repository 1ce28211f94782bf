//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::{ApiResult, ErrorBody, json_config};

/// The versioned API: `/api/v1/users` and `/api/v1/users/{id}`.
///
/// Handlers expect a `web::Data<state::HttpState>` registered on the app.
#[must_use]
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(json_config())
        .service(users::create_user)
        .service(users::get_user)
        .service(users::delete_user)
}
