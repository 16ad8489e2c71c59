use serde_json::Value;
use std::fmt;

/// Closed set of failure categories surfaced by LectureLens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or blank request fields
    InvalidInput,

    /// HTTP verb not served by the route
    MethodNotAllowed,

    /// No summarization provider credential configured
    ProviderUnavailable,

    /// Upstream provider failed or returned nothing usable
    ProviderError,

    /// History store not configured
    StorageUnavailable,

    /// History store call failed
    StorageError,

    /// Invalid configuration
    Config,

    /// Anything else (body parsing, IO, serialization)
    UnexpectedError,
}

impl ErrorKind {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::MethodNotAllowed => 405,
            Self::ProviderUnavailable => 500,
            Self::ProviderError => 500,
            Self::StorageUnavailable => 500,
            Self::StorageError => 500,
            Self::Config => 500,
            Self::UnexpectedError => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::ProviderError => "provider_error",
            Self::StorageUnavailable => "storage_unavailable",
            Self::StorageError => "storage_error",
            Self::Config => "config",
            Self::UnexpectedError => "unexpected_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LectureLens error value
///
/// Constructed at the point of failure; the server turns it into a
/// `{ "error", "details"?, "raw"? }` JSON body in one place.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,

    /// Structured diagnostic detail (e.g. upstream status and body)
    pub details: Option<Value>,

    /// Raw upstream payload that could not be interpreted
    pub raw: Option<Value>,
}

impl AppError {
    pub fn new<S: Into<String>>(kind: ErrorKind, msg: S) -> Self {
        Self {
            kind,
            message: msg.into(),
            details: None,
            raw: None,
        }
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::InvalidInput, msg)
    }

    /// Create method not allowed error
    pub fn method_not_allowed() -> Self {
        Self::new(ErrorKind::MethodNotAllowed, "Method not allowed")
    }

    /// Create provider unavailable error
    pub fn provider_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::ProviderUnavailable, msg)
    }

    /// Create provider error
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::ProviderError, msg)
    }

    /// Create storage unavailable error
    pub fn storage_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::StorageUnavailable, msg)
    }

    /// Create storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::StorageError, msg)
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::Config, msg)
    }

    /// Create unexpected error
    pub fn unexpected<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::UnexpectedError, msg)
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// JSON body sent to the caller
    pub fn to_body(&self) -> Value {
        let mut body = serde_json::json!({ "error": self.message });
        if let Some(details) = &self.details {
            body["details"] = details.clone();
        }
        if let Some(raw) = &self.raw {
            body["raw"] = raw.clone();
        }
        body
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::unexpected(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::unexpected(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::unexpected(e.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::unexpected(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::invalid_input("x").status_code(), 400);
        assert_eq!(AppError::method_not_allowed().status_code(), 405);
        assert_eq!(AppError::provider_unavailable("x").status_code(), 500);
        assert_eq!(AppError::provider("x").status_code(), 500);
        assert_eq!(AppError::unexpected("x").status_code(), 500);
    }

    #[test]
    fn test_body_shape() {
        let err = AppError::provider("Gemini request failed")
            .with_details(serde_json::json!({ "status": 429 }));
        let body = err.to_body();
        assert_eq!(body["error"], "Gemini request failed");
        assert_eq!(body["details"]["status"], 429);
        assert!(body.get("raw").is_none());

        let body = AppError::method_not_allowed().to_body();
        assert_eq!(body, serde_json::json!({ "error": "Method not allowed" }));
    }

    #[test]
    fn test_json_error_is_unexpected() {
        let parse_err = serde_json::from_str::<Value>("{not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert_eq!(err.kind, ErrorKind::UnexpectedError);
        assert!(!err.message.is_empty());
    }
}
