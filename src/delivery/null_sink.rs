//! No-op sink for acknowledgment-only deployments.

use super::{ContactSink, DeliveryResult};
use async_trait::async_trait;
use tracing::debug;

/// A sink that discards every submission.
///
/// Used when no delivery transport is configured. The endpoint still
/// validates and acknowledges as usual.
pub struct NullSink;

impl NullSink {
    /// Creates a new NullSink instance.
    pub fn new() -> Self {
        debug!("Using NullSink (submissions are not delivered)");
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactSink for NullSink {
    async fn deliver(&self, _name: &str, _email: &str, _message: &str) -> DeliveryResult<()> {
        Ok(())
    }
}
