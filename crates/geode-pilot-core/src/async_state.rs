//! Async component state management
//!
//! Shared loading/error/data bookkeeping for anything fed by a remote call.
//! Two failure flavours exist: [`AsyncState::set_error`] keeps the last good
//! data around (listings that should degrade gracefully), while
//! [`AsyncState::fail`] drops it (views where old data would mislead).

use chrono::{DateTime, Utc};

/// Shared state for async-loading components
///
/// # Examples
///
/// ```
/// use geode_pilot_core::async_state::AsyncState;
///
/// let mut state: AsyncState<Vec<String>> = AsyncState::idle();
///
/// state.start_loading();
/// assert!(state.is_loading());
///
/// state.set_data(vec!["orders".to_string()]);
/// assert!(!state.is_loading());
/// assert!(state.data().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct AsyncState<T> {
    /// The loaded data (None if not yet loaded or cleared)
    data: Option<T>,
    loading: bool,
    /// Error message if the last load failed
    error: Option<String>,
    /// When the data was last successfully loaded
    last_refresh: Option<DateTime<Utc>>,
    /// Consecutive failures, for display only; nothing retries
    failure_count: u32,
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> AsyncState<T> {
    /// Create a new async state in initial loading state
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::idle()
        }
    }

    /// Create a new async state that is not loading
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_refresh: None,
            failure_count: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// Start a loading operation, keeping existing data for display
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Start a loading operation that invalidates what was shown
    ///
    /// Data and error are dropped so nothing stale lingers while the new
    /// load is in flight.
    pub fn start_reload(&mut self) {
        self.data = None;
        self.error = None;
        self.loading = true;
    }

    /// Replace the data wholesale after a successful load
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
        self.failure_count = 0;
        self.last_refresh = Some(Utc::now());
    }

    /// Record a failed load, preserving existing data
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.loading = false;
        self.failure_count += 1;
    }

    /// Record a failed load and discard existing data
    pub fn fail(&mut self, error: impl ToString) {
        self.data = None;
        self.set_error(error);
    }

    pub fn clear(&mut self) {
        *self = Self::idle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state: AsyncState<String> = AsyncState::new();
        assert!(state.is_loading());
        assert!(!state.has_error());
        assert!(state.data().is_none());

        let idle: AsyncState<String> = AsyncState::default();
        assert!(!idle.is_loading());
    }

    #[test]
    fn test_set_data() {
        let mut state: AsyncState<i32> = AsyncState::new();
        state.set_data(42);

        assert!(!state.is_loading());
        assert!(!state.has_error());
        assert_eq!(state.data(), Some(&42));
        assert!(state.last_refresh().is_some());
        assert_eq!(state.failure_count(), 0);
    }

    #[test]
    fn test_set_error_preserves_data() {
        let mut state: AsyncState<i32> = AsyncState::idle();
        state.set_data(42);

        state.start_loading();
        assert_eq!(state.data(), Some(&42));
        state.set_error("Refresh failed");

        assert_eq!(state.data(), Some(&42));
        assert_eq!(state.error(), Some("Refresh failed"));
        assert_eq!(state.failure_count(), 1);

        state.start_loading();
        state.set_error("Still failing");
        assert_eq!(state.failure_count(), 2);
    }

    #[test]
    fn test_reload_and_fail_drop_data() {
        let mut state: AsyncState<i32> = AsyncState::idle();
        state.set_data(1);
        state.set_error("old");

        state.start_reload();
        assert!(state.is_loading());
        assert!(state.data().is_none());
        assert!(state.error().is_none());

        state.set_data(2);
        state.fail("Region not found");
        assert!(state.data().is_none());
        assert_eq!(state.error(), Some("Region not found"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_clear() {
        let mut state: AsyncState<i32> = AsyncState::new();
        state.set_error("x");
        state.clear();
        assert!(!state.is_loading());
        assert!(!state.has_error());
        assert_eq!(state.failure_count(), 0);
    }
}
