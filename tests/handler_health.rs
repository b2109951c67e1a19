mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use contact_gateway::api::handlers::health_handler;
use contact_gateway::config::RateLimitSettings;

fn health_server(rate_limit: RateLimitSettings) -> TestServer {
    let state = common::create_test_state(common::test_config(rate_limit));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = health_server(common::default_rate_limit());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["rate_limiter"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = health_server(common::default_rate_limit());

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("rate_limiter").is_some());
}

#[tokio::test]
async fn test_health_reports_disabled_limiter() {
    let server = health_server(RateLimitSettings {
        enabled: false,
        window_ms: 60_000,
        max_requests: 100,
        path_prefix: "/api/".to_string(),
    });

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["rate_limiter"]["message"], "Disabled");
}
