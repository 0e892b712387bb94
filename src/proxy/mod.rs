//! Auth proxy for the AIlways front end
//!
//! Browser-facing `/api/auth/*` routes that forward to the backend session
//! service and relay its status, body and cookies.

pub mod body;
pub mod client;
pub mod cookies;
pub mod handlers;

pub use body::{parse_body, relay_body, DetailBody};
pub use client::{BackendClient, BackendReply};
pub use cookies::{ForwardedCookies, CSRF_COOKIE, SESSION_COOKIE};
pub use handlers::{LoginRequest, RegisterRequest};
