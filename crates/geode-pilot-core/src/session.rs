//! Per-session client state
//!
//! Owned by whoever composes the components and passed to them explicitly.

use crate::async_state::AsyncState;
use crate::constants::DEFAULT_PAGE_LIMIT;
use crate::types::{DataPage, PageWindow, RegionSummary};
use std::collections::BTreeSet;

/// Where the current region stands relative to the latest catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStatus {
    /// No region selected
    #[default]
    None,
    /// Present in the latest catalog
    Listed,
    /// Just created, not listed yet
    AwaitingPropagation,
    /// Neither listed nor pending
    Unlisted,
}

#[derive(Debug, Clone)]
pub struct Session {
    current_region: Option<String>,
    page: AsyncState<DataPage>,
    window: PageWindow,
    page_limit: u32,
    awaiting: BTreeSet<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

impl Session {
    pub fn new(page_limit: u32) -> Self {
        let page_limit = page_limit.max(1);
        Self {
            current_region: None,
            page: AsyncState::idle(),
            window: PageWindow::first(page_limit),
            page_limit,
            awaiting: BTreeSet::new(),
        }
    }

    pub fn current_region(&self) -> Option<&str> {
        self.current_region.as_deref()
    }

    pub fn page(&self) -> &AsyncState<DataPage> {
        &self.page
    }

    pub(crate) fn page_mut(&mut self) -> &mut AsyncState<DataPage> {
        &mut self.page
    }

    /// Window of the current (or in-flight) page request
    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub(crate) fn set_target(&mut self, region: &str, window: PageWindow) {
        self.current_region = Some(region.to_string());
        self.window = window;
    }

    /// Drop the selection and whatever page was shown for it
    pub fn clear_selection(&mut self) {
        self.current_region = None;
        self.window = PageWindow::first(self.page_limit);
        self.page.clear();
    }

    pub fn mark_awaiting(&mut self, region: &str) {
        self.awaiting.insert(region.to_string());
    }

    pub fn forget_awaiting(&mut self, region: &str) {
        self.awaiting.remove(region);
    }

    pub fn is_awaiting(&self, region: &str) -> bool {
        self.awaiting.contains(region)
    }

    pub fn awaiting(&self) -> impl Iterator<Item = &str> {
        self.awaiting.iter().map(String::as_str)
    }

    /// Clear pending marks for every region the catalog now lists
    pub(crate) fn reconcile(&mut self, regions: &[RegionSummary]) {
        self.awaiting
            .retain(|pending| !regions.iter().any(|r| &r.name == pending));
    }

    pub fn selection_status(&self, regions: &[RegionSummary]) -> SelectionStatus {
        match self.current_region.as_deref() {
            None => SelectionStatus::None,
            Some(name) if regions.iter().any(|r| r.name == name) => SelectionStatus::Listed,
            Some(name) if self.is_awaiting(name) => SelectionStatus::AwaitingPropagation,
            Some(_) => SelectionStatus::Unlisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str) -> RegionSummary {
        RegionSummary {
            name: name.to_string(),
            size: 0,
            full_path: format!("/{}", name),
        }
    }

    #[test]
    fn test_selection_status() {
        let mut session = Session::default();
        let catalog = vec![region("orders")];
        assert_eq!(session.selection_status(&catalog), SelectionStatus::None);

        session.set_target("orders", PageWindow::first(100));
        assert_eq!(session.selection_status(&catalog), SelectionStatus::Listed);

        session.set_target("fresh", PageWindow::first(100));
        assert_eq!(session.selection_status(&catalog), SelectionStatus::Unlisted);

        session.mark_awaiting("fresh");
        assert_eq!(
            session.selection_status(&catalog),
            SelectionStatus::AwaitingPropagation
        );
    }

    #[test]
    fn test_reconcile_clears_listed_pending() {
        let mut session = Session::default();
        session.mark_awaiting("a");
        session.mark_awaiting("b");

        session.reconcile(&[region("a"), region("c")]);
        assert!(!session.is_awaiting("a"));
        assert!(session.is_awaiting("b"));
        assert_eq!(session.awaiting().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_clear_selection_resets_window() {
        let mut session = Session::new(25);
        session.set_target("orders", PageWindow { limit: 25, offset: 50 });
        session.clear_selection();
        assert_eq!(session.current_region(), None);
        assert_eq!(session.window(), PageWindow::first(25));
    }
}
