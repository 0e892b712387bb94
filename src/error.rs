use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigError(format!("invalid backend url: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

// Rendered in the backend's own `{"detail": ...}` shape.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            AppError::BackendError(_) => "Service unavailable".to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            _ => "Server error".to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "detail": detail }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BackendError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure to obtain any reply from the backend session service.
///
/// A non-success HTTP status is *not* a `BackendError`: those replies are
/// relayed to the browser as they are.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Backend request timed out")]
    Timeout,

    #[error("Failed to build backend request: {0}")]
    Build(String),

    #[error("Backend request failed: {0}")]
    Request(String),

    #[error("Malformed backend response: {0}")]
    MalformedBody(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Unreachable(err.to_string())
        } else if err.is_builder() {
            BackendError::Build(err.to_string())
        } else {
            BackendError::Request(err.to_string())
        }
    }
}
