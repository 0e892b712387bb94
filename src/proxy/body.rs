//! Optimistic handling of backend response bodies.
//!
//! The backend normally answers with JSON, but proxies and crashed workers in
//! front of it do not. Parsing never fails the request: an unparseable body
//! becomes a `{"detail": ...}` wrapper carrying the raw text.

use serde::Serialize;
use serde_json::Value;

pub const SERVER_ERROR: &str = "Server error";

/// Fallback produced when a backend body is not JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailBody {
    pub detail: String,
}

impl DetailBody {
    pub fn from_raw(text: &str) -> Self {
        let detail = if text.is_empty() { SERVER_ERROR } else { text };
        Self { detail: detail.to_owned() }
    }

    pub fn into_value(self) -> Value {
        serde_json::json!({ "detail": self.detail })
    }
}

pub fn parse_body(text: &str) -> Result<Value, DetailBody> {
    serde_json::from_str(text).map_err(|_| DetailBody::from_raw(text))
}

/// The body to hand back to the browser: parsed JSON or the detail wrapper.
pub fn relay_body(text: &str) -> Value {
    parse_body(text).unwrap_or_else(DetailBody::into_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body_passes_through() {
        let body = r#"{"message":"Login successful","user":{"id":"1","name":"Ada","email":"ada@example.com"}}"#;
        assert_eq!(
            relay_body(body),
            json!({"message": "Login successful", "user": {"id": "1", "name": "Ada", "email": "ada@example.com"}})
        );
    }

    #[test]
    fn test_html_error_page_is_wrapped() {
        let body = "<html><body>502 Bad Gateway</body></html>";
        assert_eq!(parse_body(body), Err(DetailBody { detail: body.to_string() }));
        assert_eq!(relay_body(body), json!({ "detail": body }));
    }

    #[test]
    fn test_empty_body_becomes_server_error() {
        assert_eq!(relay_body(""), json!({ "detail": "Server error" }));
    }

    #[test]
    fn test_truncated_json_is_wrapped_verbatim() {
        assert_eq!(relay_body(r#"{"detail": "Inv"#), json!({ "detail": r#"{"detail": "Inv"# }));
    }
}
