mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use contact_gateway::config::{Environment, RateLimitSettings};
use contact_gateway::routes::app_router;
use serde_json::json;

const EXPECTED_HEADERS: &[(&str, &str)] = &[
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "permissions-policy",
        "camera=(), microphone=(), geolocation=()",
    ),
];

fn test_server() -> TestServer {
    let state = common::create_test_state(common::test_config(common::default_rate_limit()));
    TestServer::new(app_router(state)).unwrap()
}

fn assert_security_headers(response: &axum_test::TestResponse) {
    let headers = response.headers();

    for (name, expected) in EXPECTED_HEADERS {
        let value = headers
            .get(*name)
            .unwrap_or_else(|| panic!("missing header '{name}'"))
            .to_str()
            .unwrap();
        assert_eq!(value, *expected, "header '{name}'");
    }

    let csp = headers
        .get("content-security-policy")
        .expect("missing content-security-policy")
        .to_str()
        .unwrap();
    assert!(csp.contains("default-src 'self'"));
    assert!(csp.contains("frame-ancestors 'none'"));
}

#[tokio::test]
async fn test_headers_on_success_response() {
    let server = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_security_headers(&response);
}

#[tokio::test]
async fn test_headers_on_not_found() {
    let server = test_server();

    let response = server.get("/no-such-path").await;
    response.assert_status_not_found();
    assert_security_headers(&response);
}

#[tokio::test]
async fn test_headers_on_validation_error() {
    let server = test_server();

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": "",
            "email": "bogus",
            "message": "short"
        }))
        .await;

    response.assert_status_bad_request();
    assert_security_headers(&response);
}

#[tokio::test]
async fn test_headers_on_parse_error() {
    let server = test_server();

    let response = server
        .post("/api/contact")
        .content_type("application/json")
        .text("{ broken")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_security_headers(&response);
}

#[tokio::test]
async fn test_headers_on_rate_limited_response() {
    let state = common::create_test_state(common::test_config(RateLimitSettings {
        enabled: true,
        window_ms: 60_000,
        max_requests: 1,
        path_prefix: "/api/".to_string(),
    }));
    let server = TestServer::new(app_router(state)).unwrap();

    server.get("/api/anything").await;
    let denied = server.get("/api/anything").await;

    denied.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_security_headers(&denied);
}

#[tokio::test]
async fn test_hsts_absent_outside_production() {
    let server = test_server();

    let response = server.get("/health").await;
    assert!(
        response
            .headers()
            .get("strict-transport-security")
            .is_none()
    );
}

#[tokio::test]
async fn test_hsts_present_in_production() {
    let mut config = common::test_config(common::default_rate_limit());
    config.environment = Environment::Production;
    let state = common::create_test_state(config);
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server.get("/health").await;
    let hsts = response.headers().get("strict-transport-security").cloned();

    assert_eq!(
        hsts.expect("HSTS should be set in production"),
        "max-age=31536000; includeSubDomains"
    );
}

#[tokio::test]
async fn test_static_assets_bypass_the_header_stack() {
    let server = test_server();

    let response = server.get("/static/no-such-asset.css").await;

    response.assert_status_not_found();
    assert!(response.headers().get("x-frame-options").is_none());
}
