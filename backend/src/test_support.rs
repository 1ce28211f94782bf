//! Test utilities for the user service crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Compiled
//! for tests and when the `test-support` feature is enabled.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{RequestContext, User, UserId};

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Freeze the clock at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// In-memory [`UserRepository`] with the same observable contract as the
/// PostgreSQL adapter.
///
/// Calls honour the request context, so cancelled or expired contexts fail
/// the same way they would against a database.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<UserId, User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, ctx: &RequestContext, user: &User) -> Result<(), UserPersistenceError> {
        ctx.run(async {
            let mut users = self.lock();
            if users.contains_key(user.id()) {
                return Err(UserPersistenceError::duplicate(user.id().to_string()));
            }
            users.insert(*user.id(), user.clone());
            Ok(())
        })
        .await?
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &UserId,
    ) -> Result<User, UserPersistenceError> {
        ctx.run(async {
            self.lock()
                .get(id)
                .cloned()
                .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))
        })
        .await?
    }

    async fn delete(&self, ctx: &RequestContext, id: &UserId) -> Result<(), UserPersistenceError> {
        ctx.run(async {
            self.lock()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))
        })
        .await?
    }
}
