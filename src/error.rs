// Client-side API error taxonomy
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::api::format::format_validation_errors;

/// Classification of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    // 401
    Authentication,
    // 403
    Forbidden,
    // 400 / 422
    Validation,
    // 404
    NotFound,
    // >= 500
    Server,
    // Transport failure before any response arrived
    Network,
    // Everything else, including bodies that could not be decoded
    Unknown,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Forbidden,
            400 | 422 => ErrorKind::Validation,
            404 => ErrorKind::NotFound,
            s if s >= 500 => ErrorKind::Server,
            _ => ErrorKind::Unknown,
        }
    }

    /// Default `error` name used when the response body does not carry one
    pub fn default_name(&self) -> &'static str {
        match self {
            ErrorKind::Authentication => "AuthenticationError",
            ErrorKind::Forbidden => "ForbiddenError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Server => "ServerError",
            ErrorKind::Network => "NetworkError",
            ErrorKind::Unknown => "UnknownError",
        }
    }
}

/// Backend error messages are either a single string or, for validation
/// failures, a list of per-field messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    /// Extract `message` from a parsed error body. An empty string counts
    /// as absent.
    pub fn from_body(body: &Value) -> Option<Self> {
        match body.get("message")? {
            Value::String(s) if !s.is_empty() => Some(ErrorMessage::Single(s.clone())),
            Value::Array(items) => Some(ErrorMessage::Many(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::Single(msg) => f.write_str(msg),
            ErrorMessage::Many(msgs) => f.write_str(&format_validation_errors(msgs)),
        }
    }
}

impl From<&str> for ErrorMessage {
    fn from(msg: &str) -> Self {
        ErrorMessage::Single(msg.to_string())
    }
}

impl From<String> for ErrorMessage {
    fn from(msg: String) -> Self {
        ErrorMessage::Single(msg)
    }
}

/// A failed request as surfaced to callers: `{statusCode, message, error, data}`
/// plus the classified kind.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status_code: Option<u16>,
    pub message: ErrorMessage,
    pub error: String,
    pub data: Option<Value>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, status_code: Option<u16>, message: impl Into<ErrorMessage>) -> Self {
        Self {
            kind,
            status_code,
            message: message.into(),
            error: kind.default_name().to_string(),
            data: None,
        }
    }

    /// Build the error for a non-2xx JSON response
    pub fn from_response_body(status: u16, status_text: &str, body: Value) -> Self {
        let kind = ErrorKind::from_status(status);
        let message = ErrorMessage::from_body(&body)
            .unwrap_or_else(|| ErrorMessage::Single(status_text.to_string()));
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| kind.default_name().to_string());

        Self {
            kind,
            status_code: Some(status),
            message,
            error,
            data: Some(body),
        }
    }

    /// Build the error for a non-2xx response whose body is not JSON
    pub fn request_failed(status: u16, status_text: &str) -> Self {
        Self {
            kind: ErrorKind::from_status(status),
            status_code: Some(status),
            message: ErrorMessage::Single(format!("HTTP {}: {}", status, status_text)),
            error: "RequestError".to_string(),
            data: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, None, message.into())
    }

    pub fn decode(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, status, message.into())
    }

    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    /// Single human-readable sentence, validation lists collapsed
    pub fn user_message(&self) -> String {
        self.message.to_string()
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication | ErrorKind::Forbidden)
    }

    pub fn is_validation_error(&self) -> bool {
        self.kind == ErrorKind::Validation
    }

    pub fn is_server_error(&self) -> bool {
        self.kind == ErrorKind::Server
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::decode(err.status().map(|s| s.as_u16()), err.to_string());
        }
        ApiError::network(format!(
            "Network error. Please check your internet connection. ({})",
            err
        ))
    }
}

/// Reason phrase for a status code, `"Error"` when unknown
pub fn status_text(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Error")
}
