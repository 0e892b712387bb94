pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
pub mod proxy;

use std::sync::Arc;
use actix_web::{web, HttpResponse};

pub use error::{AppError, BackendError};
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{get_me, route_guard, CurrentUser, RouteGuard, User};
pub use proxy::{BackendClient, ForwardedCookies};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared by every worker.
///
/// Holds configuration and the backend client only; no per-user or
/// per-session data lives here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub backend: BackendClient,
    pub guard: RouteGuard,
}

impl AppState {
    pub fn new(config: Settings) -> Result<Self> {
        config.validate()?;
        let backend = BackendClient::new(&config.backend)?;
        let guard = RouteGuard::from_routes(&config.routes);

        Ok(Self {
            config: Arc::new(config),
            backend,
            guard,
        })
    }
}

/// Registers every route. Paths for pages come from `routes` so the guard,
/// redirects and handlers agree on them.
pub fn routes(cfg: &mut web::ServiceConfig, routes: &config::RoutesConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .route("/health", web::get().to(health_check))
    .service(
        web::scope("/api/auth")
            .route("/login", web::post().to(proxy::handlers::login))
            .route("/register", web::post().to(proxy::handlers::register))
            .route("/logout", web::post().to(proxy::handlers::logout))
            .route("/me", web::get().to(proxy::handlers::me)),
    )
    .route("/", web::get().to(pages::home))
    .route(&routes.signin_path, web::get().to(pages::signin_page))
    .route(&routes.signin_path, web::post().to(pages::signin_submit))
    .route(&routes.signup_path, web::get().to(pages::signup_page))
    .route(&routes.signup_path, web::post().to(pages::signup_submit))
    .route(&routes.dashboard_path, web::get().to(pages::dashboard))
    .route(pages::SIGNOUT_PATH, web::post().to(pages::signout));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let config = Settings::for_backend("http://localhost:8080").expect("Failed to load test config");
        let state = AppState::new(config).expect("Failed to build state");
        assert_eq!(state.backend.endpoint("/auth/me"), "http://localhost:8080/auth/me");
        assert!(state.guard.protects("/dashboard"));
    }

    #[test]
    fn test_app_state_rejects_invalid_config() {
        let mut config = Settings::for_backend("http://localhost:8080").expect("Failed to load test config");
        config.routes.signin_path = "signin".into();
        assert!(matches!(AppState::new(config), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_app_state_clone() {
        let config = Settings::for_backend("http://localhost:8080").expect("Failed to load test config");
        let state = AppState::new(config).expect("Failed to build state");
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }
}
