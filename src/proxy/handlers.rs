use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::body::{parse_body, relay_body};
use super::client::{BackendClient, BackendReply};
use super::cookies::{removal_cookies, ForwardedCookies};
use crate::error::{AppError, BackendError};
use crate::AppState;

/// Sign-in form fields. The JSON API forwards whatever it receives instead.
#[derive(Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Copies every backend `Set-Cookie` onto the outgoing response, byte for byte.
pub(crate) fn append_set_cookies(res: &mut HttpResponseBuilder, reply: &BackendReply) {
    for cookie in &reply.set_cookies {
        match HeaderValue::from_bytes(cookie.as_bytes()) {
            Ok(value) => {
                res.append_header((header::SET_COOKIE, value));
            }
            Err(e) => warn!("Dropping unrelayable Set-Cookie header: {}", e),
        }
    }
}

/// The email in a forwarded body, for log lines only.
fn email_of(body: &Value) -> &str {
    body.get("email").and_then(Value::as_str).unwrap_or("<none>")
}

// Request bodies are not checked here: the backend validates them and its
// errors are relayed as they are.
pub async fn login(
    req: web::Json<Value>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Forwarding login for email: {}", email_of(&req));

    let reply = state.backend.login(&req.into_inner())
        .await
        .inspect_err(|e| error!(%request_id, "Login forward failed: {}", e))?;
    if !reply.is_success() {
        warn!(%request_id, "Backend rejected login with status {}", reply.status);
    }

    let mut res = HttpResponse::build(reply.status_code());
    append_set_cookies(&mut res, &reply);
    Ok(res.json(relay_body(&reply.body)))
}

// Registration does not open a session, so no cookies are copied.
pub async fn register(
    req: web::Json<Value>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Forwarding registration for email: {}", email_of(&req));

    let reply = state.backend.register(&req.into_inner())
        .await
        .inspect_err(|e| error!(%request_id, "Registration forward failed: {}", e))?;
    if !reply.is_success() {
        warn!(%request_id, "Backend rejected registration with status {}", reply.status);
    }

    Ok(HttpResponse::build(reply.status_code()).json(relay_body(&reply.body)))
}

/// Ends the backend session and reports what to tell the browser.
///
/// A backend that cannot be reached still counts as logged out.
pub(crate) async fn end_session(
    backend: &BackendClient,
    cookies: &ForwardedCookies,
) -> (StatusCode, Value) {
    match backend.logout(cookies).await {
        Ok(reply) => {
            if !reply.is_success() {
                warn!("Backend logout answered with status {}", reply.status);
            }
            let body = parse_body(&reply.body).unwrap_or_else(|_| json!({}));
            (reply.status_code(), body)
        }
        Err(e) => {
            warn!("Backend unreachable during logout, clearing cookies anyway: {}", e);
            (StatusCode::OK, json!({ "message": "Logged out" }))
        }
    }
}

pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let cookies = ForwardedCookies::from_request(&req);
    info!("Forwarding logout");

    let (status, body) = end_session(&state.backend, &cookies).await;

    let mut res = HttpResponse::build(status);
    for cookie in removal_cookies() {
        res.cookie(cookie);
    }
    res.json(body)
}

pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let cookies = ForwardedCookies::from_request(&req);

    let reply = state.backend.me(&cookies)
        .await
        .inspect_err(|e| error!("Identity lookup failed: {}", e))?;
    let body: Value = serde_json::from_str(&reply.body)
        .map_err(|e| BackendError::MalformedBody(e.to_string()))?;

    Ok(HttpResponse::build(reply.status_code())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body))
}
