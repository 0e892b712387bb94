#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::location;

async fn backend_with_me(status: u16, expected_calls: u64) -> MockServer {
    let backend = MockServer::start().await;
    let body = if status == 200 {
        json!({ "id": "5f7c", "name": "Ada Lovelace", "email": "ada@example.com" })
    } else {
        json!({ "detail": "Session expired or invalid" })
    };
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(expected_calls)
        .mount(&backend)
        .await;
    backend
}

#[actix_web::test]
async fn test_protected_paths_without_cookie_redirect_before_backend() {
    // The guard answers on its own; the backend is never asked
    let backend = backend_with_me(200, 0).await;
    let app = spawn_app!(&backend.uri());

    for uri in ["/dashboard", "/dashboard/", "/dashboard/settings"] {
        let resp = test::TestRequest::get()
            .uri(uri)
            .insert_header(("cookie", "csrf_token=t0k3n; theme=dark"))
            .send_request(&app)
            .await;

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT, "status for {}", uri);
        assert_eq!(location(&resp), Some("/signin"));
    }
}

#[actix_web::test]
async fn test_stale_cookie_passes_guard_and_page_redirects() {
    // Cookie present but the backend has forgotten the session
    let backend = backend_with_me(401, 1).await;
    let app = spawn_app!(&backend.uri());

    let resp = test::TestRequest::get()
        .uri("/dashboard")
        .insert_header(("cookie", "session_id=expired"))
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/signin"));
}

#[actix_web::test]
async fn test_stale_cookie_on_signin_renders_form_without_loop() {
    let backend = backend_with_me(401, 1).await;
    let app = spawn_app!(&backend.uri());

    let resp = test::TestRequest::get()
        .uri("/signin")
        .insert_header(("cookie", "session_id=expired"))
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Welcome back"));
    assert!(html.contains(r#"action="/signin""#));
}

#[actix_web::test]
async fn test_valid_session_reaches_dashboard() {
    let backend = backend_with_me(200, 1).await;
    let app = spawn_app!(&backend.uri());

    let resp = test::TestRequest::get()
        .uri("/dashboard")
        .insert_header(("cookie", "session_id=s3ss10n"))
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Welcome back, Ada Lovelace."));
    assert!(html.contains(r#"action="/signout""#));
}

#[actix_web::test]
async fn test_signed_in_user_is_sent_from_auth_pages_to_dashboard() {
    let backend = backend_with_me(200, 2).await;
    let app = spawn_app!(&backend.uri());

    for uri in ["/signin", "/signup"] {
        let resp = test::TestRequest::get()
            .uri(uri)
            .insert_header(("cookie", "session_id=s3ss10n"))
            .send_request(&app)
            .await;

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT, "status for {}", uri);
        assert_eq!(location(&resp), Some("/dashboard"));
    }
}

#[actix_web::test]
async fn test_unprotected_paths_pass_without_cookie() {
    let backend = backend_with_me(401, 1).await;
    let app = spawn_app!(&backend.uri());

    let resp = test::TestRequest::get().uri("/").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::TestRequest::get().uri("/health").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_percent_encoded_protected_path_is_guarded() {
    let backend = backend_with_me(200, 0).await;
    let app = spawn_app!(&backend.uri());

    let resp = test::TestRequest::get().uri("/%64ashboard").send_request(&app).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/signin"));
}
