//! Delivery of accepted contact submissions.
//!
//! The gateway itself only validates and acknowledges submissions; getting
//! them somewhere useful (a mailbox, a ticket queue, a CRM) happens behind
//! the [`ContactSink`] trait so deployments can plug in their own transport.
//!
//! # Implementations
//!
//! - [`LogSink`] - writes submissions to the log (development default)
//! - [`NullSink`] - discards submissions (acknowledgment-only mode)

mod log_sink;
mod null_sink;

pub use log_sink::LogSink;
pub use null_sink::NullSink;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Errors that can occur while handing a submission to a sink.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Delivery backend unavailable: {0}")]
    Unavailable(String),

    #[error("Submission rejected by backend: {0}")]
    Rejected(String),
}

/// Result type for sink operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

// TODO: add an SMTP-backed sink once outbound mail credentials exist for
// the deployed environments.

/// Destination for accepted contact submissions.
///
/// Implementations must be thread-safe. A sink failure is logged by the
/// caller and never surfaces to the submitting client, so implementations
/// may simply report errors instead of retrying.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactSink: Send + Sync {
    /// Hands one validated submission to the sink.
    async fn deliver(&self, name: &str, email: &str, message: &str) -> DeliveryResult<()>;
}
