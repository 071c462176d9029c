mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_tracker::api::handlers::health_handler;

fn server() -> TestServer {
    let (state, _store) = common::create_test_state(false);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["storage"]["message"], "Backend: memory");
    assert_eq!(json["checks"]["geolocation"]["message"], "Provider: stub");
    assert_eq!(json["checks"]["click_workers"]["message"], "Available: 8/8");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = server();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("storage").is_some());
    assert!(json["checks"].get("geolocation").is_some());
    assert!(json["checks"].get("click_workers").is_some());
}
