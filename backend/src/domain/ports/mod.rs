//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`]) describe what the domain needs from
//! storage. Driving ports ([`UsersCommand`], [`UsersQuery`]) are what inbound
//! adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
