use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{status_text, ApiError};

/// Successful response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decode into the caller's type. Text payloads decode as a JSON string,
    /// so `String` always works for non-JSON endpoints.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Payload::Json(v) => v,
            Payload::Text(t) => Value::String(t),
        };
        serde_json::from_value(value)
            .map_err(|e| ApiError::decode(None, format!("Failed to decode response: {}", e)))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }
}

pub(crate) fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Turn a raw status/content-type/body triple into a payload or a classified
/// failure.
pub(crate) fn interpret(status: u16, content_type: Option<&str>, body: String) -> Result<Payload, ApiError> {
    let success = (200..300).contains(&status);
    let reason = status_text(status);

    if !is_json_content_type(content_type) {
        if !success {
            return Err(ApiError::request_failed(status, reason));
        }
        return Ok(Payload::Text(body));
    }

    let parsed: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).map_err(|e| {
            ApiError::decode(Some(status), format!("Invalid JSON in response body: {}", e))
        })?
    };

    if !success {
        return Err(ApiError::from_response_body(status, reason, parsed));
    }

    Ok(Payload::Json(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ErrorMessage};

    #[test]
    fn text_success_returns_raw_text() {
        let payload = interpret(200, Some("text/plain; charset=utf-8"), "pong".into()).unwrap();
        assert_eq!(payload, Payload::Text("pong".into()));
        let s: String = payload.decode().unwrap();
        assert_eq!(s, "pong");
    }

    #[test]
    fn text_failure_is_request_error() {
        let err = interpret(503, Some("text/html"), "<h1>down</h1>".into()).unwrap_err();
        assert_eq!(err.error, "RequestError");
        assert_eq!(err.status_code, Some(503));
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn missing_content_type_is_treated_as_text() {
        let payload = interpret(204, None, String::new()).unwrap();
        assert_eq!(payload, Payload::Text(String::new()));
    }

    #[test]
    fn json_not_found() {
        let err = interpret(
            404,
            Some("application/json; charset=utf-8"),
            r#"{"message":"Not found"}"#.into(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.error, "NotFoundError");
        assert_eq!(err.message, ErrorMessage::Single("Not found".into()));
    }

    #[test]
    fn json_error_without_message_uses_reason() {
        let err = interpret(500, Some("application/json"), "{}".into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn malformed_json_is_unknown() {
        let err = interpret(200, Some("application/json"), "{oops".into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.status_code, Some(200));
    }
}
