#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;

/// Builds the full application against a backend at `$backend_url`.
macro_rules! spawn_app {
    (@with $settings:expr) => {{
        let settings: ailways_web::Settings = $settings;
        let paths = settings.routes.clone();
        let state = ailways_web::AppState::new(settings).expect("Failed to build app state");
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::from_fn(ailways_web::route_guard))
                .app_data(actix_web::web::Data::new(state))
                .configure(move |cfg| ailways_web::routes(cfg, &paths)),
        )
        .await
    }};
    ($backend_url:expr, timeout_secs = $secs:expr) => {{
        let mut settings = common::settings_for($backend_url);
        settings.backend.timeout_secs = $secs;
        spawn_app!(@with settings)
    }};
    ($backend_url:expr) => {
        spawn_app!(@with common::settings_for($backend_url))
    };
}

pub fn settings_for(backend_url: &str) -> ailways_web::Settings {
    ailways_web::Settings::for_backend(backend_url).expect("Failed to load test settings")
}

/// A url nothing is listening on, for simulating a refused connection.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind scratch port");
    let addr = listener.local_addr().expect("Failed to read scratch address");
    drop(listener);
    format!("http://{}", addr)
}

/// A one-shot backend that answers `status` and promises a longer JSON body
/// than it sends before hanging up.
pub fn truncated_backend(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind backend port");
    let addr = listener.local_addr().expect("Failed to read backend address");

    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let head = format!(
            "HTTP/1.1 {} Backend\r\ncontent-type: application/json\r\ncontent-length: 64\r\nconnection: close\r\n\r\n{{\"det",
            status
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.flush();
    });

    format!("http://{}", addr)
}

pub fn response_cookies<B>(resp: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
    resp.response().cookies().map(Cookie::into_owned).collect()
}

pub fn is_removal(cookie: &Cookie<'_>) -> bool {
    cookie.value().is_empty()
        && cookie.max_age() == Some(actix_web::cookie::time::Duration::ZERO)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<&str> {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
