//! Top-level router configuration combining routes and middleware.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check (headers applied, never rate-limited)
//! - `/api/*`            - REST API (rate-limited; mount point follows
//!   `RATE_LIMIT_PATH_PREFIX`)
//! - `/static/*`         - Static assets, outside the middleware stack
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Security headers** - Stamped onto every response, including errors
//! - **Rate limiting** - Fixed window per client on the protected prefix
//!
//! The rate limiter sits innermost so its `429` still passes the header
//! layer on the way out. Unmatched paths produce a 404 that carries the
//! security headers as well.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, security_headers, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// The static file service is mounted after the middleware layers, so asset
/// responses carry no security headers and are never counted by the limiter.
pub fn app_router(state: AppState) -> Router {
    // Trailing slashes are normalized away at serve time, so the mount
    // point is the prefix without them.
    let api_mount = state
        .config
        .rate_limit
        .path_prefix
        .trim_end_matches('/')
        .to_string();

    Router::new()
        .route("/health", get(health_handler))
        .nest(&api_mount, api::routes::protected_routes())
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ))
        .layer(middleware::from_fn_with_state(
            state,
            security_headers::layer,
        ))
        .layer(tracing::layer())
        .nest_service("/static", ServeDir::new("static"))
}
