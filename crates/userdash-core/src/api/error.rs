//! Structured errors for the remote API boundary.

use std::fmt;

use serde_json::Value;

/// Categories of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    Transport,
    /// The server rejected the credentials or token (non-2xx on auth routes).
    Auth,
    /// Non-2xx status on a data route.
    HttpStatus,
    /// The response body could not be decoded.
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Auth => write!(f, "auth"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Error returned by [`crate::api::ApiClient`].
///
/// `message` is a one-line summary suitable for an error banner; the raw
/// response body (if any) is kept in `details` for logs.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Builds an error from a non-success response.
    ///
    /// The demo API reports failures as `{"message": "..."}`; when present
    /// that text is folded into the summary.
    pub fn from_status(kind: ApiErrorKind, status: u16, body: &str) -> Self {
        let details = (!body.is_empty()).then(|| body.to_string());
        let server_message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            json.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        });
        let message = match server_message {
            Some(msg) if !msg.trim().is_empty() => format!("HTTP {status}: {}", msg.trim()),
            _ => format!("HTTP {status}"),
        };
        Self {
            kind,
            message,
            details,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Maps a reqwest failure that happened before or while reading a response.
pub(crate) fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::transport(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ApiError::transport(format!("Connection failed: {e}"))
    } else if e.is_decode() {
        ApiError::decode(format!("Invalid response: {e}"))
    } else {
        ApiError::transport(format!("Network error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_extracts_server_message() {
        let err = ApiError::from_status(
            ApiErrorKind::Auth,
            400,
            r#"{"message":"Invalid credentials"}"#,
        );
        assert_eq!(err.kind, ApiErrorKind::Auth);
        assert_eq!(err.to_string(), "HTTP 400: Invalid credentials");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_from_status_without_json_body() {
        let err = ApiError::from_status(ApiErrorKind::HttpStatus, 502, "Bad Gateway");
        assert_eq!(err.to_string(), "HTTP 502");
        assert_eq!(err.details.as_deref(), Some("Bad Gateway"));
    }

    #[test]
    fn test_from_status_empty_body() {
        let err = ApiError::from_status(ApiErrorKind::HttpStatus, 500, "");
        assert_eq!(err.to_string(), "HTTP 500");
        assert!(err.details.is_none());
    }
}
