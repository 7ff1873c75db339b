//! services/api/src/adapters/http.rs
//!
//! Error mapping shared by the HTTP adapters.

use momo_core::ports::PortError;
use reqwest::StatusCode;

/// Builds a `PortError::Service` for a non-success response.
///
/// The message always carries the status code and the raw body. When the body
/// is JSON with an `error.message` field, that message leads.
pub fn service_error(service: &str, status: StatusCode, body: &str) -> PortError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    let code = status.as_u16();
    let message = match detail {
        Some(msg) => format!("{} API error ({}): {} | {}", service, code, msg, body),
        None => format!("{} API error ({}): {}", service, code, body),
    };

    PortError::Service {
        status: code,
        message,
    }
}

/// Maps a transport-level `reqwest` failure (connect, timeout, body read).
pub fn transport_error(service: &str, err: reqwest::Error) -> PortError {
    if err.is_timeout() {
        PortError::Network(format!("{} request timed out: {}", service, err))
    } else {
        PortError::Network(format!("Could not reach {}: {}", service, err))
    }
}
