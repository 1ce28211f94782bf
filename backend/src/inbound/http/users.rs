//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users       {"name":"Alice","email":"alice@example.com"}
//! GET    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::User;
use crate::domain::ports::CreateUserRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, require, require_email};

/// Confirmation returned by `DELETE /api/v1/users/{id}`.
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully";

/// Request body for `POST /api/v1/users`.
///
/// Only a JSON object is accepted. Missing fields deserialize as empty
/// strings so they are reported by field validation rather than as a
/// malformed payload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CreateUserBody {
    /// Display name of the new user.
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: String,
    /// Contact address of the new user.
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

#[derive(Deserialize)]
struct CreateUserFields {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

impl<'de> Deserialize<'de> for CreateUserBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Derived struct impls also accept sequences; insist on an object.
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let CreateUserFields { name, email } =
            CreateUserFields::deserialize(Value::Object(object)).map_err(serde::de::Error::custom)?;
        Ok(Self { name, email })
    }
}

/// User representation returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// Time-ordered UUIDv7 identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// RFC 3339 timestamp.
    pub created_at: DateTime<Utc>,
    /// RFC 3339 timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Confirmation text.
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let CreateUserBody { name, email } = payload.into_inner();
    require("name", &name)?;
    require_email("email", &email)?;

    let ctx = state.request_context();
    let user = state
        .users_command
        .create_user(&ctx, CreateUserRequest { name, email })
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;

    let ctx = state.request_context();
    let user = state.users_query.get_user(&ctx, &id).await?;

    Ok(web::Json(UserResponse::from(&user)))
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_user_id(&path)?;

    let ctx = state.request_context();
    state.users_command.delete_user(&ctx, &id).await?;

    Ok(web::Json(MessageResponse {
        message: USER_DELETED_MESSAGE.to_owned(),
    }))
}
