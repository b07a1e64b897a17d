//! API middleware components

pub mod logging;
pub mod metrics;
pub mod security;

pub use self::logging::{logging_middleware, REQUEST_ID_HEADER};
pub use self::metrics::metrics_middleware;
pub use self::security::security_headers_middleware;
