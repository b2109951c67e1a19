//! HTTP middleware for request processing and protection.
//!
//! Provides security headers, rate limiting, and observability middleware.

pub mod rate_limit;
pub mod security_headers;
pub mod tracing;
