//! Error taxonomy and user-facing formatting
//!
//! Every failure that reaches the operator is one of three kinds: the
//! request never produced a usable answer ([`ConsoleError::Transport`]), the
//! backend answered `success=false` ([`ConsoleError::Backend`]), or the input
//! was rejected before any request ([`ConsoleError::Validation`]).

use geode_rs::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    #[error("{}", format_transport_error(.0))]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Validation(String),
}

impl ConsoleError {
    /// Backend failure, falling back to a generic message
    pub fn backend(error: Option<String>) -> Self {
        ConsoleError::Backend(
            error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }
}

/// Format a TransportError into a user-friendly message
///
/// A non-2xx answer carries the backend's own message, which is surfaced
/// verbatim. Network-level failures are turned into actionable text.
///
/// # Examples
///
/// ```
/// use geode_pilot_core::errors::format_transport_error;
/// use geode_rs::TransportError;
///
/// let error = TransportError::Connection("tcp connect error: Connection refused".to_string());
/// assert!(format_transport_error(&error).contains("refused"));
///
/// let error = TransportError::Status { status: 400, message: "Region already exists".to_string() };
/// assert_eq!(format_transport_error(&error), "Region already exists");
/// ```
pub fn format_transport_error(error: &TransportError) -> String {
    match error {
        TransportError::Connection(msg) => format_connection_error(msg),
        TransportError::Timeout(_) => "Request timed out - the data browser may be slow or unreachable".to_string(),
        TransportError::Status { message, .. } => message.clone(),
        TransportError::Decode(msg) => format!("Malformed response: {}", msg),
        TransportError::InvalidEndpoint(msg) => format!("Invalid endpoint: {}", msg),
    }
}

fn format_connection_error(msg: &str) -> String {
    let lower = msg.to_lowercase();
    if lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl") {
        "TLS/certificate error - check the endpoint scheme".to_string()
    } else if lower.contains("refused") {
        "Connection refused - is the data browser running?".to_string()
    } else if lower.contains("dns") || lower.contains("resolve") {
        "DNS resolution failed - check the endpoint hostname".to_string()
    } else if lower.contains("reset") {
        "Connection reset by peer".to_string()
    } else {
        format!("Connection failed: {}", msg)
    }
}

/// Categorize an error for display purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network/connection issues
    Network,
    Timeout,
    /// The backend refused the operation
    Backend,
    /// Rejected locally before any request
    Validation,
    /// Response did not have the expected shape
    Decode,
    Other,
}

impl ErrorCategory {
    /// Get a short label for the category
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network",
            ErrorCategory::Timeout => "Timeout",
            ErrorCategory::Backend => "Backend",
            ErrorCategory::Validation => "Validation",
            ErrorCategory::Decode => "Decode",
            ErrorCategory::Other => "Error",
        }
    }
}

pub fn categorize_error(error: &ConsoleError) -> ErrorCategory {
    match error {
        ConsoleError::Transport(TransportError::Connection(_)) => ErrorCategory::Network,
        ConsoleError::Transport(TransportError::Timeout(_)) => ErrorCategory::Timeout,
        ConsoleError::Transport(TransportError::Status { .. }) => ErrorCategory::Backend,
        ConsoleError::Transport(TransportError::Decode(_)) => ErrorCategory::Decode,
        ConsoleError::Transport(TransportError::InvalidEndpoint(_)) => ErrorCategory::Other,
        ConsoleError::Backend(_) => ErrorCategory::Backend,
        ConsoleError::Validation(_) => ErrorCategory::Validation,
    }
}
