//! User management REST service.
//!
//! Layered as a hexagon: [`domain`] holds the entity, ports and service;
//! [`inbound`] adapts HTTP onto the driving ports; [`outbound`] implements
//! the persistence port on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
