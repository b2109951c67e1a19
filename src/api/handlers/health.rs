//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// Mounted outside the protected prefix so probes are never rate-limited.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "rate_limiter": {
///       "status": "ok",
///       "message": "Tracking 12 client(s)"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            rate_limiter: check_rate_limiter(&state),
        },
    })
}

/// Reports limiter mode and table size.
fn check_rate_limiter(state: &AppState) -> CheckStatus {
    if state.rate_limiter.is_enabled() {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "Tracking {} client(s)",
                state.rate_limiter.tracked_clients()
            )),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Disabled".to_string()),
        }
    }
}
