use serde_json::Value;

pub const NETWORK_ERROR: &str = "Network error. Please try again.";
pub const GENERIC_ERROR: &str = "Something went wrong";

/// The text a form shows for a failed backend reply.
///
/// Field validation failures arrive as `{"detail": [{"msg": ...}, ...]}` and
/// are joined with `". "`; anything else uses a plain string `detail`.
pub fn error_message(body: &Value) -> String {
    let message = match body.get("detail") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(". "),
        Some(Value::String(detail)) => detail.clone(),
        _ => String::new(),
    };

    if message.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        message
    }
}
