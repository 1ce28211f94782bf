//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{DomainError, RequestContext, User, UserId};

/// Input for [`UsersCommand::create_user`].
///
/// Fields are raw strings; the service enforces the business invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Requested display name.
    pub name: String,
    /// Requested contact address.
    pub email: String,
}

/// Use-cases that create or remove users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate the request, construct a new user and persist it.
    async fn create_user(
        &self,
        ctx: &RequestContext,
        request: CreateUserRequest,
    ) -> Result<User, DomainError>;

    /// Remove an existing user.
    async fn delete_user(&self, ctx: &RequestContext, id: &UserId) -> Result<(), DomainError>;
}
