//! Error mapping for remote responses
//!
//! Converts the status and body of a non-2xx answer into the error message an
//! envelope reports, and classifies statuses for log fields.

use serde_json::Value;

use super::ServiceError;

/// Message used when the body parsed but carried no usable `message`
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Derive the error message of a non-2xx response.
///
/// A body that parsed to a truthy JSON value yields its `message` field (or
/// [`DEFAULT_FAILURE_MESSAGE`]); anything else yields `HTTP {status}`.
pub fn failure_message(status: u16, body: Option<&Value>) -> String {
    match body {
        Some(json) if is_truthy(json) => match json.get("message") {
            Some(message) if is_truthy(message) => display_value(message),
            _ => DEFAULT_FAILURE_MESSAGE.to_string(),
        },
        _ => format!("HTTP {}", status),
    }
}

/// Build the server error for a non-2xx response
pub fn map_http_error(status: u16, body: Option<&Value>) -> ServiceError {
    ServiceError::server(status, failure_message(status, body))
}

/// Helper function to classify HTTP statuses by category
pub fn classify_status(status: u16) -> &'static str {
    match status {
        200..=299 => "success",
        400 => "validation",
        401 => "authentication",
        403 => "authorization",
        404 => "not_found",
        408 => "timeout",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "unknown",
    }
}

/// JSON values that a loosely typed client would treat as "present"
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
