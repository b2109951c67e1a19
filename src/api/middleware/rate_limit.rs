//! Fixed-window rate limiting keyed by client address.
//!
//! Each client key gets one counter. A key's first request opens a window;
//! requests inside the window increment the counter and are denied once the
//! budget is spent; the first request after the window expires resets it.
//! Counters more than one full window past their reset point are swept on
//! every check, which keeps the table bounded by recently active clients.
//!
//! Two caveats are inherent to the design:
//!
//! - The window is fixed, not sliding. A client can spend one budget at the
//!   end of a window and a fresh one right after the boundary, reaching up
//!   to twice the nominal rate across it. A sliding-window or token-bucket
//!   limiter could replace this one behind the same [`RateLimiter::check`]
//!   contract.
//! - The client key comes from `X-Forwarded-For` / `X-Real-IP`, which the
//!   client controls unless a trusted proxy overwrites them. Treat the
//!   limiter as an abuse throttle, not a security boundary.

use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use metrics::counter;

use crate::{config::RateLimitSettings, error::AppError, state::AppState};

/// Key used when neither forwarding header names a client address.
/// Header-less clients all share this one bucket.
const FALLBACK_CLIENT_KEY: &str = "127.0.0.1";

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

/// Counter state for one client key.
#[derive(Debug)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Per-client fixed-window request limiter.
///
/// Constructed once at startup and shared through
/// [`AppState`](crate::state::AppState). Each map entry is locked for the
/// whole read-modify-write, so concurrent requests from one client cannot
/// undercount.
#[derive(Debug)]
pub struct RateLimiter {
    enabled: bool,
    max_requests: u32,
    window: Duration,
    entries: DashMap<String, WindowEntry>,
}

impl RateLimiter {
    pub fn new(settings: &RateLimitSettings) -> Self {
        Self {
            enabled: settings.enabled,
            max_requests: settings.max_requests,
            window: settings.window(),
            entries: DashMap::new(),
        }
    }

    /// Records a request for `key` and decides whether it may proceed.
    ///
    /// A disabled limiter allows everything and tracks nothing.
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    /// Clock-explicit variant of [`check`](Self::check). Tests drive this
    /// directly instead of sleeping through real windows.
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        if !self.enabled {
            return Decision::Allowed;
        }

        self.sweep(now);

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| WindowEntry {
                count: 0,
                reset_at: now + self.window,
            });

        if now >= entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.window;
        } else {
            entry.count = entry.count.saturating_add(1);
        }

        if entry.count <= self.max_requests {
            Decision::Allowed
        } else {
            Decision::Denied
        }
    }

    /// Drops entries whose window expired more than one full window ago.
    fn sweep(&self, now: Instant) {
        // `now - window` underflows early in process life; nothing can be
        // stale that soon.
        let Some(cutoff) = now.checked_sub(self.window) else {
            return;
        };
        self.entries.retain(|_, entry| entry.reset_at >= cutoff);
    }

    /// Number of client keys currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Seconds a denied client should wait, rounded up to whole seconds.
    pub fn retry_after_secs(&self) -> u64 {
        self.window.as_millis().div_ceil(1_000) as u64
    }
}

/// Derives the rate-limit key for a request from its forwarding headers.
///
/// Precedence: first hop of `X-Forwarded-For`, then `X-Real-IP`, then
/// [`FALLBACK_CLIENT_KEY`]. Blank values are skipped.
pub fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
        && let Some(first) = forwarded.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    FALLBACK_CLIENT_KEY.to_string()
}

/// Whether `path` falls under the protected prefix.
///
/// Matches on a path-segment boundary, so a prefix of `/api` (with or
/// without the trailing slash) covers `/api` and `/api/contact` but not
/// `/apifoo`.
pub fn path_is_protected(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Enforces the request budget on the protected path prefix.
///
/// Requests outside the prefix pass through uncounted. Denied requests are
/// answered here with `429 Too Many Requests` plus a `Retry-After` header
/// and never reach a handler.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api", protected_routes())
///     .layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    if !path_is_protected(req.uri().path(), &st.config.rate_limit.path_prefix) {
        return next.run(req).await;
    }

    let key = client_key(req.headers());

    match st.rate_limiter.check(&key) {
        Decision::Allowed => next.run(req).await,
        Decision::Denied => {
            counter!("rate_limit_denied_total").increment(1);
            tracing::warn!(
                client = %key,
                path = %req.uri().path(),
                "Request rejected: rate limit exceeded"
            );
            AppError::TooManyRequests {
                retry_after_secs: st.rate_limiter.retry_after_secs(),
            }
            .into_response()
        }
    }
}
