use std::fmt;

use super::types::ErrorReply;

/// Categories of game server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request could not complete (connect failure, timeout, broken body)
    Transport,
    /// Non-2xx status other than a structured validation error
    HttpStatus,
    /// 4xx with a server-supplied `{ "error": ... }` message
    Validation,
    /// 2xx body that is not what the endpoint promises
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Validation => write!(f, "validation"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the game server client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// One-line summary suitable for display
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// Builds an error from a non-2xx response.
    ///
    /// A 4xx carrying `{ "error": "..." }` becomes a `Validation` error with the
    /// server text verbatim. Anything else is `HTTP <status>`, with the server
    /// text appended when present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let server_text = serde_json::from_str::<ErrorReply>(body)
            .ok()
            .and_then(|reply| reply.error)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let (kind, message) = match server_text {
            Some(text) if (400..500).contains(&status) => (ApiErrorKind::Validation, text),
            Some(text) => (ApiErrorKind::HttpStatus, format!("HTTP {status}: {text}")),
            None => (ApiErrorKind::HttpStatus, format!("HTTP {status}")),
        };
        Self {
            kind,
            status: Some(status),
            message,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    /// True when the server says the session is unknown or expired.
    pub fn is_invalid_session(&self) -> bool {
        if self.kind != ApiErrorKind::Validation {
            return false;
        }
        let text = self.message.to_lowercase();
        text.contains("session")
            && (text.contains("invalid") || text.contains("expired") || text.contains("unknown"))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::transport(format!("Request timed out: {e}"))
        } else if e.is_decode() {
            ApiError::parse(format!("Invalid response body: {e}"))
        } else {
            ApiError::transport(format!("Connection failed: {e}"))
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_400_with_error_is_validation() {
        let err = ApiError::http_status(400, r#"{"error":"Invalid session"}"#);
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "Invalid session");
        assert!(err.is_invalid_session());
    }

    #[test]
    fn test_status_without_body_is_generic() {
        let err = ApiError::http_status(502, "<html>Bad gateway</html>");
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(!err.is_invalid_session());
    }

    #[test]
    fn test_any_4xx_with_error_is_validation() {
        for status in [401, 403, 404, 410, 422] {
            let err = ApiError::http_status(status, r#"{"error":"Invalid session"}"#);
            assert_eq!(err.kind, ApiErrorKind::Validation, "status {status}");
            assert_eq!(err.to_string(), "Invalid session");
            assert!(err.is_invalid_session());
        }
    }

    #[test]
    fn test_400_without_error_field_is_generic() {
        let err = ApiError::http_status(400, "{}");
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.to_string(), "HTTP 400");
    }

    #[test]
    fn test_server_error_keeps_detail() {
        let err = ApiError::http_status(500, r#"{"error":"upstream model failed"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.to_string(), "HTTP 500: upstream model failed");
        assert!(!err.is_invalid_session());
    }

    #[test]
    fn test_invalid_session_detection() {
        let expired = ApiError::http_status(400, r#"{"error":"Session expired"}"#);
        assert!(expired.is_invalid_session());

        let empty_question = ApiError::http_status(400, r#"{"error":"Question is empty"}"#);
        assert!(!empty_question.is_invalid_session());

        let transport = ApiError::transport("invalid session cookie jar");
        assert!(!transport.is_invalid_session());
    }
}
