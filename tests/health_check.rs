#[macro_use]
mod common;

use actix_web::test;
use chrono::DateTime;

#[actix_web::test]
async fn test_health_check() {
    // Health never touches the backend, so an unreachable one is fine
    let app = spawn_app!(&common::refused_url());

    // Send request
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    // Assert response
    assert!(resp.status().is_success());

    // Parse response body
    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Verify response format
    assert_eq!(json["status"], "healthy");
    assert!(DateTime::parse_from_rfc3339(
        json["timestamp"].as_str().unwrap()
    ).is_ok());
}
