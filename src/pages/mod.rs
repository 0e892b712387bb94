//! Server-rendered pages
//!
//! Every page asks the backend for the current user through [`CurrentUser`];
//! forms post back here and are forwarded with the same client the
//! `/api/auth/*` proxy uses.

pub mod forms;
pub mod views;

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::proxy::body::relay_body;
use crate::proxy::cookies::removal_cookies;
use crate::proxy::handlers::{append_set_cookies, end_session};
use crate::proxy::{ForwardedCookies, LoginRequest, RegisterRequest};
use crate::AppState;

pub const SIGNOUT_PATH: &str = "/signout";

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

/// Page-level redirect after a GET.
fn redirect(location: &str) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub async fn home(user: CurrentUser, state: web::Data<AppState>) -> HttpResponse {
    html(StatusCode::OK, views::home(user.user(), &state.config.routes))
}

pub async fn signin_page(user: CurrentUser, state: web::Data<AppState>) -> HttpResponse {
    let routes = &state.config.routes;
    if user.user().is_some() {
        return redirect(&routes.dashboard_path);
    }
    html(StatusCode::OK, views::signin(None, "", routes))
}

pub async fn signin_submit(
    form: web::Form<LoginRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let routes = &state.config.routes;
    let form = form.into_inner();

    match state.backend.login(&form).await {
        Ok(reply) if reply.is_success() => {
            info!("Sign-in succeeded for email: {}", form.email);
            let mut res = HttpResponse::SeeOther();
            res.insert_header((header::LOCATION, routes.dashboard_path.as_str()));
            append_set_cookies(&mut res, &reply);
            res.finish()
        }
        Ok(reply) => {
            let message = forms::error_message(&relay_body(&reply.body));
            html(reply.status_code(), views::signin(Some(&message), &form.email, routes))
        }
        Err(e) => {
            warn!("Sign-in could not reach backend: {}", e);
            html(
                StatusCode::SERVICE_UNAVAILABLE,
                views::signin(Some(forms::NETWORK_ERROR), &form.email, routes),
            )
        }
    }
}

pub async fn signup_page(user: CurrentUser, state: web::Data<AppState>) -> HttpResponse {
    let routes = &state.config.routes;
    if user.user().is_some() {
        return redirect(&routes.dashboard_path);
    }
    html(StatusCode::OK, views::signup(None, "", "", routes))
}

pub async fn signup_submit(
    form: web::Form<RegisterRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let routes = &state.config.routes;
    let form = form.into_inner();

    match state.backend.register(&form).await {
        Ok(reply) if reply.is_success() => {
            info!("Sign-up succeeded for email: {}", form.email);
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, routes.signin_path.as_str()))
                .finish()
        }
        Ok(reply) => {
            let message = forms::error_message(&relay_body(&reply.body));
            html(
                reply.status_code(),
                views::signup(Some(&message), &form.name, &form.email, routes),
            )
        }
        Err(e) => {
            warn!("Sign-up could not reach backend: {}", e);
            html(
                StatusCode::SERVICE_UNAVAILABLE,
                views::signup(Some(forms::NETWORK_ERROR), &form.name, &form.email, routes),
            )
        }
    }
}

pub async fn dashboard(user: CurrentUser, state: web::Data<AppState>) -> HttpResponse {
    match user.into_inner() {
        Some(user) => html(StatusCode::OK, views::dashboard(&user)),
        None => redirect(&state.config.routes.signin_path),
    }
}

/// Logs out like `/api/auth/logout` does, then sends the browser to sign-in
/// whatever the backend said.
pub async fn signout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let cookies = ForwardedCookies::from_request(&req);
    let (status, _) = end_session(&state.backend, &cookies).await;
    info!("Signed out, backend answered {}", status);

    let mut res = HttpResponse::SeeOther();
    res.insert_header((header::LOCATION, state.config.routes.signin_path.as_str()));
    for cookie in removal_cookies() {
        res.cookie(cookie);
    }
    res.finish()
}
