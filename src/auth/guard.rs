//! Cookie-presence gate in front of protected pages.
//!
//! The guard only checks that a `session_id` cookie exists. Whether the
//! session is still valid is decided by the page through [`CurrentUser`],
//! which can redirect a stale cookie to sign-in without looping. The guard
//! never sends anyone away from sign-in or sign-up.
//!
//! [`CurrentUser`]: super::CurrentUser

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse};
use tracing::debug;

use crate::config::RoutesConfig;
use crate::proxy::SESSION_COOKIE;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected_prefix: String,
    signin_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new("/dashboard", "/signin")
    }
}

impl RouteGuard {
    pub fn new(protected_prefix: &str, signin_path: &str) -> Self {
        let trimmed = protected_prefix.trim_end_matches('/');
        Self {
            protected_prefix: if trimmed.is_empty() { "/".into() } else { trimmed.into() },
            signin_path: signin_path.into(),
        }
    }

    pub fn from_routes(routes: &RoutesConfig) -> Self {
        Self::new(&routes.protected_prefix, &routes.signin_path)
    }

    /// `/dashboard` protects `/dashboard` and `/dashboard/...`, not `/dashboards`.
    pub fn protects(&self, path: &str) -> bool {
        if self.protected_prefix == "/" {
            return true;
        }
        match path.strip_prefix(self.protected_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn decide(&self, path: &str, has_session: bool) -> GuardDecision {
        if self.protects(path) && !has_session {
            GuardDecision::Redirect(self.signin_path.clone())
        } else {
            GuardDecision::Pass
        }
    }
}

/// `actix_web::middleware::from_fn` entry point.
pub async fn route_guard(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let has_session = req.cookie(SESSION_COOKIE).is_some();
    // Routing sees the percent-decoded path, so the guard must too
    let path = req.match_info().unprocessed().to_owned();
    let decision = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.guard.decide(&path, has_session),
        None => RouteGuard::default().decide(&path, has_session),
    };

    match decision {
        GuardDecision::Pass => next.call(req).await.map(ServiceResponse::map_into_left_body),
        GuardDecision::Redirect(location) => {
            debug!("No session cookie for {}, redirecting to {}", path, location);
            let res = HttpResponse::TemporaryRedirect()
                .insert_header((header::LOCATION, location))
                .finish();
            Ok(req.into_response(res).map_into_right_body())
        }
    }
}
