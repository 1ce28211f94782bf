//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{ContextError, RequestContext, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the same identifier is already stored.
        Duplicate { id: String } => "user {id} already exists",
        /// No stored user matches the identifier.
        NotFound { id: String } => "user {id} not found",
        /// A stored row could not be turned back into a user.
        DataCorruption { message: String } => "stored user data is corrupt: {message}",
        /// The request context was cancelled while the call was in flight.
        Cancelled => "user repository call was cancelled",
        /// The request deadline passed while the call was in flight.
        Timeout => "user repository call exceeded the request deadline",
    }
}

impl From<ContextError> for UserPersistenceError {
    fn from(error: ContextError) -> Self {
        match error {
            ContextError::Cancelled => Self::cancelled(),
            ContextError::DeadlineExceeded => Self::timeout(),
        }
    }
}

/// Storage contract for users, independent of any particular backend.
///
/// Implementations own the durable copy; callers only ever see transient
/// values. No method mutates a stored user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    ///
    /// Storing an identifier twice fails with
    /// [`UserPersistenceError::Duplicate`].
    async fn create(&self, ctx: &RequestContext, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    ///
    /// Absence is reported as [`UserPersistenceError::NotFound`]; rows that no
    /// longer satisfy the entity invariants are reported as
    /// [`UserPersistenceError::DataCorruption`].
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &UserId,
    ) -> Result<User, UserPersistenceError>;

    /// Remove a user by identifier.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when nothing was removed.
    async fn delete(&self, ctx: &RequestContext, id: &UserId) -> Result<(), UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ContextError::Cancelled, UserPersistenceError::Cancelled)]
    #[case(ContextError::DeadlineExceeded, UserPersistenceError::Timeout)]
    fn context_errors_map_to_persistence_errors(
        #[case] source: ContextError,
        #[case] expected: UserPersistenceError,
    ) {
        assert_eq!(UserPersistenceError::from(source), expected);
    }

    #[rstest]
    fn not_found_message_names_the_identifier() {
        let err = UserPersistenceError::not_found("0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a");
        assert_eq!(
            err.to_string(),
            "user 0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a not found"
        );
    }
}
