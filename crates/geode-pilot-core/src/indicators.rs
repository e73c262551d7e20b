//! Health and status indicators for consistent UI representation

use serde::{Deserialize, Serialize};

/// Universal health/status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HealthIndicator {
    /// Fully healthy/operational
    Healthy,
    /// Degraded but functional
    Warning,
    /// Failed or critical error
    Error,
    /// Pending or transitioning state
    Pending,
    /// State cannot be determined
    #[default]
    Unknown,
}

impl HealthIndicator {
    /// Unicode symbol for this status
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthIndicator::Healthy => "●",
            HealthIndicator::Warning => "◐",
            HealthIndicator::Error => "✗",
            HealthIndicator::Pending => "○",
            HealthIndicator::Unknown => "?",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthIndicator::Healthy => "Healthy",
            HealthIndicator::Warning => "Warning",
            HealthIndicator::Error => "Error",
            HealthIndicator::Pending => "Pending",
            HealthIndicator::Unknown => "Unknown",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthIndicator::Healthy)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, HealthIndicator::Error)
    }
}

impl std::fmt::Display for HealthIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cluster connection state as last reported by a status poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    /// The backend reports a live connection to the cluster
    Connected,
    /// The backend explicitly reports it is not connected
    Disconnected,
    /// The poll itself failed or the answer was unusable
    Error,
}

impl ConnectionState {
    /// Parse the backend's `status` string
    ///
    /// Anything other than `connected`/`disconnected` counts as an error.
    pub fn from_wire(status: Option<&str>) -> Self {
        match status.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("connected") => ConnectionState::Connected,
            Some("disconnected") => ConnectionState::Disconnected,
            _ => ConnectionState::Error,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Error => "error",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl From<ConnectionState> for HealthIndicator {
    fn from(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Connected => HealthIndicator::Healthy,
            ConnectionState::Disconnected => HealthIndicator::Warning,
            ConnectionState::Error => HealthIndicator::Error,
        }
    }
}
