use actix_web::http::StatusCode;
use reqwest::header::{HeaderValue, CACHE_CONTROL, COOKIE, SET_COOKIE};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::cookies::ForwardedCookies;
use crate::config::BackendConfig;
use crate::error::{AppError, BackendError};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const ME_PATH: &str = "/auth/me";

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Everything the proxy relays from one backend response.
///
/// `Set-Cookie` values are kept as raw header values, opaque bytes included.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: u16,
    pub set_cookies: Vec<HeaderValue>,
    pub body: String,
}

impl BackendReply {
    /// Status and headers are taken first. A body that breaks off midway reads
    /// as empty and the backend's status still stands.
    async fn read(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let set_cookies = res.headers().get_all(SET_COOKIE).iter().cloned().collect();
        let body = res.text().await.unwrap_or_else(|e| {
            warn!("Failed to read backend response body ({}): {}", status, e);
            String::new()
        });

        Self { status, set_cookies, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY)
    }
}

/// HTTP client for the backend session service.
///
/// Holds a connection pool but no cookie jar: the only cookies a backend
/// request carries are the ones passed in explicitly. One attempt per call.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Appends `path` to the base url, keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login<T: Serialize>(&self, credentials: &T) -> Result<BackendReply, BackendError> {
        self.post_json(LOGIN_PATH, credentials).await
    }

    pub async fn register<T: Serialize>(&self, registration: &T) -> Result<BackendReply, BackendError> {
        self.post_json(REGISTER_PATH, registration).await
    }

    /// Bodiless POST carrying the session cookies and the CSRF token echoed as a header.
    pub async fn logout(&self, cookies: &ForwardedCookies) -> Result<BackendReply, BackendError> {
        let url = self.endpoint(LOGOUT_PATH);
        debug!("POST {}", url);

        let mut req = self
            .http
            .post(url)
            .header(CSRF_HEADER, cookies.csrf_token().unwrap_or_default());
        if let Some(cookie) = cookies.header_value() {
            req = req.header(COOKIE, cookie);
        }

        Ok(BackendReply::read(req.send().await?).await)
    }

    pub async fn me(&self, cookies: &ForwardedCookies) -> Result<BackendReply, BackendError> {
        let url = self.endpoint(ME_PATH);
        debug!("GET {}", url);

        let mut req = self.http.get(url).header(CACHE_CONTROL, "no-store");
        if let Some(cookie) = cookies.header_value() {
            req = req.header(COOKIE, cookie);
        }

        Ok(BackendReply::read(req.send().await?).await)
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<BackendReply, BackendError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let res = self.http.post(url).json(body).send().await?;

        Ok(BackendReply::read(res).await)
    }
}
