//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{DomainError, RequestContext, User, UserId};

/// Read-only user use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch a single user by identifier.
    async fn get_user(&self, ctx: &RequestContext, id: &UserId) -> Result<User, DomainError>;
}
