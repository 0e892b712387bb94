use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

use crate::proxy::{BackendClient, ForwardedCookies};
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Asks the backend who owns the forwarded session.
///
/// Every call goes to the backend; nothing is cached between requests.
/// All failures (non-success status, network error, malformed body) are `None`.
pub async fn get_me(backend: &BackendClient, cookies: &ForwardedCookies) -> Option<User> {
    let reply = match backend.me(cookies).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Identity lookup failed: {}", e);
            return None;
        }
    };

    if !reply.is_success() {
        debug!("No current user, backend answered {}", reply.status);
        return None;
    }

    serde_json::from_str(&reply.body)
        .inspect_err(|e| warn!("Backend returned a malformed user record: {}", e))
        .ok()
}

/// The authoritative identity check for server-rendered pages.
/// Never rejects the request: `CurrentUser(None)` means signed out.
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<User> {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let cookies = ForwardedCookies::from_request(req);
        Box::pin(async move {
            let state = state.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("application state not configured")
            })?;
            Ok(CurrentUser(get_me(&state.backend, &cookies).await))
        })
    }
}
