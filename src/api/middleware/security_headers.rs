//! Browser security headers applied to every response.
//!
//! The header set is computed once at startup from the runtime environment
//! and then stamped onto each outbound response, including error and
//! rate-limited responses produced by other middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, header},
    middleware::Next,
    response::Response,
};

use crate::{config::Environment, state::AppState};

/// Content-Security-Policy directives, joined with `"; "` into one value.
///
/// `unsafe-eval` / `unsafe-inline` stay until the served frontend ships
/// without inline scripts.
const CSP_DIRECTIVES: &[&str] = &[
    "default-src 'self'",
    "script-src 'self' 'unsafe-eval' 'unsafe-inline'",
    "style-src 'self' 'unsafe-inline'",
    "img-src 'self' data: https:",
    "font-src 'self' data:",
    "connect-src 'self'",
    "frame-ancestors 'none'",
];

/// One year, with subdomains included.
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// The response header set for one runtime environment.
///
/// `Strict-Transport-Security` is only part of the set in production;
/// everything else is unconditional.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaders {
    pub fn new(environment: Environment) -> Self {
        let csp = CSP_DIRECTIVES.join("; ");

        let mut headers = vec![
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_str(&csp).expect("CSP directives are a valid header value"),
            ),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ),
            (
                HeaderName::from_static("permissions-policy"),
                HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
            ),
        ];

        if environment.is_production() {
            headers.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS_VALUE),
            ));
        }

        Self { headers }
    }

    /// Inserts the set into `headers`, overwriting anything already there
    /// under the same names.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
    }
}

/// Stamps the precomputed header set onto every outbound response.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), security_headers::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    st.security_headers.apply(response.headers_mut());
    response
}
