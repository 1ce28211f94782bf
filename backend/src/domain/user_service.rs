//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`]. Business
//! invariants are checked here before any storage call; persistence failures
//! are wrapped with the name of the operation that hit them.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateUserRequest, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{EmailAddress, DomainError, RequestContext, User, UserId, UserName};

fn map_persistence_error(operation: &str, error: UserPersistenceError) -> DomainError {
    let message = format!("failed to {operation}: {error}");
    match error {
        UserPersistenceError::NotFound { .. } => DomainError::not_found(message),
        _ => DomainError::internal(message),
    }
}

/// Service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a new service backed by `user_repo`, stamping timestamps from
    /// `clock`.
    #[must_use]
    pub const fn new(user_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(
        &self,
        ctx: &RequestContext,
        request: CreateUserRequest,
    ) -> Result<User, DomainError> {
        let name = UserName::new(request.name)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        let email = EmailAddress::new(request.email)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;

        let user = User::new(name, email, self.clock.as_ref());
        if let Err(err) = self.user_repo.create(ctx, &user).await {
            warn!(user_id = %user.id(), error = %err, "user insert failed");
            return Err(map_persistence_error("create user", err));
        }

        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn delete_user(&self, ctx: &RequestContext, id: &UserId) -> Result<(), DomainError> {
        if let Err(err) = self.user_repo.delete(ctx, id).await {
            warn!(user_id = %id, error = %err, "user delete failed");
            return Err(map_persistence_error("delete user", err));
        }

        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_user(&self, ctx: &RequestContext, id: &UserId) -> Result<User, DomainError> {
        self.user_repo.find_by_id(ctx, id).await.map_err(|err| {
            warn!(user_id = %id, error = %err, "user lookup failed");
            map_persistence_error("get user", err)
        })
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
