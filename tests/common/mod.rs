#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contact_gateway::config::{Config, Environment, RateLimitSettings};
use contact_gateway::delivery::{ContactSink, DeliveryResult, NullSink};
use contact_gateway::state::AppState;

/// A sink that records every delivered submission for assertions.
#[derive(Clone, Default)]
pub struct RecordingSink {
    submissions: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<(String, String, String)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactSink for RecordingSink {
    async fn deliver(&self, name: &str, email: &str, message: &str) -> DeliveryResult<()> {
        self.submissions.lock().unwrap().push((
            name.to_string(),
            email.to_string(),
            message.to_string(),
        ));
        Ok(())
    }
}

pub fn default_rate_limit() -> RateLimitSettings {
    RateLimitSettings {
        enabled: true,
        window_ms: 60_000,
        max_requests: 100,
        path_prefix: "/api/".to_string(),
    }
}

pub fn test_config(rate_limit: RateLimitSettings) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        environment: Environment::Test,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        rate_limit,
    }
}

pub fn create_test_state(config: Config) -> AppState {
    AppState::new(config, Arc::new(NullSink::new()))
}

pub fn create_recording_state(config: Config) -> (AppState, RecordingSink) {
    let sink = RecordingSink::new();
    let state = AppState::new(config, Arc::new(sink.clone()));
    (state, sink)
}
