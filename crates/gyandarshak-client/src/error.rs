//! Mapping of HTTP failures to [`ApiError`].

use gyandarshak_core::ApiError;
use serde::Deserialize;

/// FastAPI-style error payload. `detail` is a string for handled errors and
/// a list of field errors for request validation failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pull the human-readable message out of an error body.
pub(crate) fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

/// Build the error for a non-success response.
///
/// `fallback` is used when the body carries no usable message.
pub(crate) fn from_status(status: u16, body: &str, fallback: &str) -> ApiError {
    let message = detail_message(body).unwrap_or_else(|| fallback.to_string());
    match status {
        401 | 403 => ApiError::Unauthorized(message),
        _ => ApiError::Rejected { status, message },
    }
}

pub(crate) fn from_transport(err: reqwest::Error, timeout_secs: u64) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(timeout_secs)
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}
