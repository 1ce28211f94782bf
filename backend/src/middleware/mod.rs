//! Request middleware.

pub mod cors;
pub mod trace;

pub use cors::{CorsOrigins, InvalidOrigin, cors};
pub use trace::{TRACE_ID_HEADER, Trace, TraceId};
