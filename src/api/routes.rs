//! API route configuration.
//!
//! Everything mounted here lives under the protected path prefix and is
//! covered by [`crate::api::middleware::rate_limit`].

use crate::api::handlers::contact_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// All routes served under the protected prefix.
///
/// # Endpoints
///
/// - `POST /contact` - Validated contact form submission
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/contact", post(contact_handler))
}
