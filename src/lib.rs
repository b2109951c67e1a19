//! # Contact Gateway
//!
//! A hardened contact-form API built with Axum: every response carries a
//! fixed set of browser security headers, API routes sit behind a
//! per-client fixed-window rate limit, and the submission endpoint
//! validates its payload and reports every violated constraint at once.
//!
//! ## Architecture
//!
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and the middleware stack
//! - **Delivery Layer** ([`delivery`]) - pluggable sinks for accepted submissions
//! - **Configuration** ([`config`]) - environment-driven settings
//! - **Error handling** ([`error`]) - one [`AppError`] covering the HTTP
//!   error taxonomy
//!
//! ## Request Flow
//!
//! ```text
//! client -> tracing -> security headers -> rate limit -> router -> handler
//! ```
//!
//! Over-limit requests short-circuit with `429` before reaching a handler;
//! the short-circuit response still passes the header layer on the way out.
//!
//! ## Quick Start
//!
//! ```bash
//! # All variables are optional; see the config module for defaults
//! export RATE_LIMIT_MAX=100
//! export RATE_LIMIT_WINDOW_MS=900000
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod delivery;
pub mod error;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::middleware::rate_limit::{Decision, RateLimiter};
    pub use crate::api::middleware::security_headers::SecurityHeaders;
    pub use crate::config::{Config, Environment, RateLimitSettings};
    pub use crate::delivery::{ContactSink, LogSink, NullSink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
