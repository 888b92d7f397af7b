use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcomErrorCode {
    InvalidArgument,
    Usage,
    NotFound,
    Transport,
    Api,
    Internal,
}

impl EcomErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EcomErrorCode::InvalidArgument => "ecom/invalid-argument",
            EcomErrorCode::Usage => "ecom/usage",
            EcomErrorCode::NotFound => "ecom/not-found",
            EcomErrorCode::Transport => "ecom/transport",
            EcomErrorCode::Api => "ecom/api",
            EcomErrorCode::Internal => "ecom/internal",
        }
    }
}

/// Error returned by every fallible SDK operation.
///
/// API errors additionally carry the HTTP `status` and the server-defined
/// `code` from the `{ status, code, message }` error envelope.
#[derive(Clone, Debug)]
pub struct EcomError {
    pub code: EcomErrorCode,
    message: String,
    status: Option<u16>,
    api_code: Option<String>,
}

impl EcomError {
    pub fn new(code: EcomErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            api_code: None,
        }
    }

    pub fn api(status: u16, api_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: EcomErrorCode::Api,
            message: message.into(),
            status: Some(status),
            api_code: Some(api_code.into()),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status reported by the API, for [`EcomErrorCode::Api`] errors.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Server-defined error code (e.g. `"product/not-found"`).
    pub fn api_code(&self) -> Option<&str> {
        self.api_code.as_deref()
    }

    pub fn is_usage(&self) -> bool {
        self.code == EcomErrorCode::Usage
    }
}

impl Display for EcomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.status, &self.api_code) {
            (Some(status), Some(api_code)) => {
                write!(f, "{} ({}: {status} {api_code})", self.message, self.code_str())
            }
            _ => write!(f, "{} ({})", self.message, self.code_str()),
        }
    }
}

impl Error for EcomError {}

pub type EcomResult<T> = Result<T, EcomError>;

pub fn invalid_argument(message: impl Into<String>) -> EcomError {
    EcomError::new(EcomErrorCode::InvalidArgument, message)
}

pub fn usage_error(message: impl Into<String>) -> EcomError {
    EcomError::new(EcomErrorCode::Usage, message)
}

pub fn not_found(message: impl Into<String>) -> EcomError {
    EcomError::new(EcomErrorCode::NotFound, message)
}

pub fn transport_error(message: impl Into<String>) -> EcomError {
    EcomError::new(EcomErrorCode::Transport, message)
}

pub fn internal_error(message: impl Into<String>) -> EcomError {
    EcomError::new(EcomErrorCode::Internal, message)
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps a 4xx/5xx response into an API error.
///
/// The structured envelope is used as-is; anything else falls back to the
/// HTTP status and its canonical reason phrase.
pub fn map_api_error(status: u16, body: Option<&JsonValue>) -> EcomError {
    let parsed = body.and_then(|value| ApiErrorBody::deserialize(value).ok());
    let fallback_message = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("HTTP error")
        .to_string();

    match parsed {
        Some(body) => EcomError::api(
            body.status.unwrap_or(status),
            body.code.unwrap_or_else(|| format!("http/{status}")),
            body.message.unwrap_or(fallback_message),
        ),
        None => EcomError::api(status, format!("http/{status}"), fallback_message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_body_is_kept_verbatim() {
        let body = json!({ "status": 400, "code": "bad-input", "message": "sku is required" });
        let err = map_api_error(400, Some(&body));
        assert_eq!(err.code, EcomErrorCode::Api);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.api_code(), Some("bad-input"));
        assert_eq!(err.message(), "sku is required");
    }

    #[test]
    fn unstructured_body_falls_back_to_status() {
        let err = map_api_error(503, Some(&json!("upstream down")));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.api_code(), Some("http/503"));
        assert_eq!(err.message(), "Service Unavailable");

        let err = map_api_error(500, None);
        assert_eq!(err.message(), "Internal Server Error");
    }

    #[test]
    fn display_includes_api_fields() {
        let err = EcomError::api(409, "conflict", "already exists");
        assert_eq!(err.to_string(), "already exists (ecom/api: 409 conflict)");
        assert_eq!(usage_error("nope").to_string(), "nope (ecom/usage)");
    }
}
