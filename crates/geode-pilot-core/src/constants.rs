//! Shared constants for the data-browser client

/// Entries requested per page unless configured otherwise
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Serialized values longer than this are cut in table cells
pub const VALUE_PREVIEW_CHARS: usize = 100;

/// Message shown when a create is submitted with an empty name
pub const EMPTY_REGION_NAME_MESSAGE: &str = "Please enter a region name";

// =============================================================================
// Default Refresh Intervals
// =============================================================================

/// Timer settings for background work
pub mod refresh_intervals {
    /// Cluster status poll period (seconds)
    pub const STATUS_POLL_SECS: u64 = 5;

    /// Delay between a successful region create and the catalog refresh
    /// that picks it up (milliseconds)
    pub const RECONCILE_DELAY_MS: u64 = 800;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_shorter_than_poll() {
        assert!(refresh_intervals::RECONCILE_DELAY_MS < refresh_intervals::STATUS_POLL_SECS * 1000);
        assert!(DEFAULT_PAGE_LIMIT > 0);
    }
}
