//! Error types for the Geode client

use std::path::PathBuf;

/// Failure of a single request against the data-browser API.
///
/// Every variant carries a human-readable message; callers that only need
/// the text use [`TransportError::message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server could not be reached (refused, DNS, reset, TLS)
    #[error("connection error: {0}")]
    Connection(String),

    /// The request did not complete within the configured timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON shape
    #[error("malformed response: {0}")]
    Decode(String),

    /// The configured endpoint cannot be turned into a request URL
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl TransportError {
    /// The message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            TransportError::Connection(msg)
            | TransportError::Timeout(msg)
            | TransportError::Decode(msg)
            | TransportError::InvalidEndpoint(msg) => msg,
            TransportError::Status { message, .. } => message,
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_decode() || err.is_body() {
            TransportError::Decode(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidEndpoint(err.to_string())
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

/// Errors raised while loading the client configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error("context '{0}' not found in config")]
    ContextNotFound(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_prefix() {
        let err = TransportError::Status {
            status: 400,
            message: "Region already exists: orders".to_string(),
        };
        assert_eq!(err.message(), "Region already exists: orders");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "HTTP 400: Region already exists: orders");

        let err = TransportError::Connection("connection refused".to_string());
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: TransportError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
