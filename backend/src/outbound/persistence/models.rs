//! Diesel row structs for the `users` table.
//!
//! Storage-shaped DTOs only; they never leave the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::User;

use super::schema::users;

/// Row read back from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable form of a new user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: String,
    pub name: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}
