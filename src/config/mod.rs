use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use url::Url;

use crate::auth::RouteGuard;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
}

/// Where the backend session service lives.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    pub protected_prefix: String,
    pub signin_path: String,
    pub signup_path: String,
    pub dashboard_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
    pub max_age: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub routes: RoutesConfig,
    pub cors: CorsConfig,
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
    environment: &str,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("environment", environment)?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("server.workers", num_cpus::get() as i64)?
        .set_default("backend.url", "http://localhost:8080")?
        .set_default("backend.timeout_secs", 10)?
        .set_default("routes.protected_prefix", "/dashboard")?
        .set_default("routes.signin_path", "/signin")?
        .set_default("routes.signup_path", "/signup")?
        .set_default("routes.dashboard_path", "/dashboard")?
        .set_default("cors.enabled", false)?
        .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
        .set_default("cors.max_age", 3600)
}

/// `APP_`-prefixed variables, nested with `__`.
/// E.g., `APP_BACKEND__URL=http://auth:8080` would set `Settings.backend.url`
fn environment() -> Environment {
    Environment::with_prefix("app")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    pub fn new() -> Result<Self, AppError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = with_defaults(Config::builder(), "development")?
            // Add in settings from the config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment())
            // The bare variable the deployment already knows about wins over everything
            .set_override_option("backend.url", env::var("BACKEND_URL").ok())?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Built-in defaults with the backend pointed at `url`, ignoring files and
    /// the environment.
    pub fn for_backend(url: &str) -> Result<Self, AppError> {
        let settings: Settings = with_defaults(Config::builder(), "test")?
            .set_override("backend.url", url)?
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn backend_url(&self) -> Result<Url, AppError> {
        Ok(Url::parse(&self.backend.url)?)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let url = self.backend_url()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::ConfigError(format!(
                "backend url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.backend.timeout_secs == 0 {
            return Err(AppError::ConfigError("backend.timeout_secs must be positive".into()));
        }

        let routes = [
            ("routes.protected_prefix", &self.routes.protected_prefix),
            ("routes.signin_path", &self.routes.signin_path),
            ("routes.signup_path", &self.routes.signup_path),
            ("routes.dashboard_path", &self.routes.dashboard_path),
        ];
        for (key, path) in routes {
            if !path.starts_with('/') {
                return Err(AppError::ConfigError(format!("{} must start with '/'", key)));
            }
        }

        // A protected sign-in page would redirect to itself forever
        let guard = RouteGuard::from_routes(&self.routes);
        if guard.protects(&self.routes.signin_path) || guard.protects(&self.routes.signup_path) {
            return Err(AppError::ConfigError(
                "routes.protected_prefix must not cover the sign-in or sign-up pages".into(),
            ));
        }
        Ok(())
    }
}
