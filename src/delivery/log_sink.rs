//! Log-backed sink for development.

use super::{ContactSink, DeliveryResult};
use async_trait::async_trait;

/// Writes each submission to the log at INFO.
///
/// The development stand-in for a real transport: submissions land in the
/// terminal instead of a mailbox.
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactSink for LogSink {
    async fn deliver(&self, name: &str, email: &str, message: &str) -> DeliveryResult<()> {
        tracing::info!(name, email, message, "Contact submission received");
        Ok(())
    }
}
