//! Domain primitives, ports and services.
//!
//! Purpose: define the user entity and the rules that govern it, independent
//! of HTTP and of the storage backend.
//!
//! Public surface:
//! - `User`, `UserId`, `UserName`, `EmailAddress`: the entity and its parts.
//! - `DomainError`, `ErrorCode`: transport agnostic failures.
//! - `RequestContext`: per-request cancellation and deadline token.
//! - `UserService`: implementation of the user driving ports.

pub mod context;
pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::context::{ContextError, RequestContext};
pub use self::error::{DomainError, ErrorCode};
pub use self::user::{EmailAddress, User, UserId, UserName, UserParts, UserValidationError};
pub use self::user_service::UserService;
