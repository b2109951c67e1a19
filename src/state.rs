use std::sync::Arc;

use crate::api::middleware::rate_limit::RateLimiter;
use crate::api::middleware::security_headers::SecurityHeaders;
use crate::config::Config;
use crate::delivery::ContactSink;

/// Shared application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rate_limiter: Arc<RateLimiter>,
    pub security_headers: Arc<SecurityHeaders>,
    pub contact_sink: Arc<dyn ContactSink>,
}

impl AppState {
    /// Builds the state, deriving the limiter and header set from `config`.
    pub fn new(config: Config, contact_sink: Arc<dyn ContactSink>) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));
        let security_headers = Arc::new(SecurityHeaders::new(config.environment));

        Self {
            config: Arc::new(config),
            rate_limiter,
            security_headers,
            contact_sink,
        }
    }
}
