//! User entity and its validated components.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use uuid::Uuid;

/// Storage timestamps keep microsecond precision; entity timestamps are
/// truncated to match so a persisted user reloads unchanged.
const TIMESTAMP_SUBSEC_DIGITS: u16 = 6;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was blank.
    EmptyId,
    /// The identifier is not a UUID.
    InvalidId,
    /// The name was blank.
    EmptyName,
    /// The email address was blank.
    EmptyEmail,
    /// `updated_at` precedes `created_at`.
    TimestampsOutOfOrder,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::EmptyEmail => write!(f, "email cannot be empty"),
            Self::TimestampsOutOfOrder => {
                write!(f, "created_at must not be later than updated_at")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Time-ordered user identifier backed by a UUIDv7.
///
/// Identifiers minted by one process sort in generation order, so they double
/// as a natural sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier.
    ///
    /// The UUIDv7 generator shares a counter across the process, so ids minted
    /// within the same millisecond still increase. An unavailable entropy
    /// source aborts inside the generator rather than producing an error.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse an identifier from its textual form.
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyId`] for empty input and
    /// [`UserValidationError::InvalidId`] for anything that is not a UUID.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Display name of a user. Never empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyName`] for blank input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let value: String = name.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Email address of a user. Never empty once trimmed.
///
/// Only emptiness is checked here; address syntax belongs to the inbound
/// adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyEmail`] for blank input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let value: String = email.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Components of an already persisted user.
#[derive(Debug, Clone)]
pub struct UserParts {
    /// Stored identifier.
    pub id: UserId,
    /// Stored display name.
    pub name: UserName,
    /// Stored contact address.
    pub email: EmailAddress,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

/// Application user.
///
/// ## Invariants
/// - `id` is assigned once at construction and never changes.
/// - `name` and `email` are non-empty.
/// - `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a brand new user with a fresh identifier.
    ///
    /// Both timestamps are taken from a single clock reading.
    ///
    /// # Examples
    /// ```
    /// use mockable::DefaultClock;
    /// use user_service::domain::{EmailAddress, User, UserName};
    ///
    /// let user = User::new(
    ///     UserName::new("Alice").expect("valid name"),
    ///     EmailAddress::new("alice@example.com").expect("valid email"),
    ///     &DefaultClock,
    /// );
    /// assert_eq!(user.created_at(), user.updated_at());
    /// ```
    #[must_use]
    pub fn new(name: UserName, email: EmailAddress, clock: &dyn Clock) -> Self {
        let now = clock.utc().trunc_subsecs(TIMESTAMP_SUBSEC_DIGITS);
        Self {
            id: UserId::generate(),
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from persisted components.
    ///
    /// # Errors
    /// Returns [`UserValidationError::TimestampsOutOfOrder`] when
    /// `created_at` is later than `updated_at`.
    pub fn from_parts(parts: UserParts) -> Result<Self, UserValidationError> {
        let UserParts {
            id,
            name,
            email,
            created_at,
            updated_at,
        } = parts;
        if created_at > updated_at {
            return Err(UserValidationError::TimestampsOutOfOrder);
        }
        Ok(Self {
            id,
            name,
            email,
            created_at,
            updated_at,
        })
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Contact email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests;
