//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every call is raced against the request context so a cancelled or expired
//! request releases its pooled connection promptly.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, RequestContext, User, UserId, UserName, UserParts};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, user.id()))
    }

    async fn select(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::id.eq(id.to_string()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, id))?
            .map_or_else(
                || Err(UserPersistenceError::not_found(id.to_string())),
                row_to_user,
            )
    }

    async fn remove(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(users::table.filter(users::id.eq(id.to_string())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, id))?;

        if affected == 0 {
            return Err(UserPersistenceError::not_found(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, ctx: &RequestContext, user: &User) -> Result<(), UserPersistenceError> {
        ctx.run(self.insert(user)).await?
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &UserId,
    ) -> Result<User, UserPersistenceError> {
        ctx.run(self.select(id)).await?
    }

    async fn delete(&self, ctx: &RequestContext, id: &UserId) -> Result<(), UserPersistenceError> {
        ctx.run(self.remove(id)).await?
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    debug!(error = %error, "connection checkout failed");
    UserPersistenceError::connection(error.into_message())
}

/// Map Diesel errors to user persistence errors.
fn map_diesel_error(error: diesel::result::Error, id: &UserId) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), user_id = %id, "diesel operation failed");
        }
        _ => debug!(error = %error, user_id = %id, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate(id.to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => UserPersistenceError::query(info.message()),
        other => UserPersistenceError::query(other.to_string()),
    }
}

/// Rebuild a domain user from a stored row.
///
/// Rows that break an entity invariant are reported as corruption instead of
/// being skipped or treated as missing.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        created_at,
        updated_at,
    } = row;

    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        UserPersistenceError::data_corruption(format!("user {id}: {field}: {err}"))
    };

    User::from_parts(UserParts {
        id: UserId::parse(&id).map_err(|err| corrupt("id", &err))?,
        name: UserName::new(name).map_err(|err| corrupt("name", &err))?,
        email: EmailAddress::new(email).map_err(|err| corrupt("email", &err))?,
        created_at,
        updated_at,
    })
    .map_err(|err| corrupt("timestamps", &err))
}
