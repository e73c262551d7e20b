//! Region data viewer
//!
//! Loads one page of a region's entries at a time. A load is split into
//! three steps so the caller can run the network part anywhere:
//!
//! 1. [`RegionDataViewer::begin_load`] records the target in the session,
//!    drops the shown page, renders "loading" and issues a [`Ticket`].
//! 2. [`RegionDataViewer::fetch`] performs the request.
//! 3. [`RegionDataViewer::complete`] installs the result, but only if its
//!    ticket is still the latest one issued. Anything older is discarded, so
//!    the last load *issued* wins regardless of completion order.

use crate::errors::ConsoleError;
use crate::sequence::{Sequencer, Ticket};
use crate::session::Session;
use crate::types::{DataPage, PageWindow};
use crate::view::{DataTableView, DataView, Renderer};
use geode_rs::{GeodeClient, Transport};

#[derive(Debug, Default)]
pub struct RegionDataViewer {
    sequencer: Sequencer,
}

impl RegionDataViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket of the most recently issued load
    pub fn latest(&self) -> Option<Ticket> {
        self.sequencer.latest()
    }

    pub fn begin_load(
        &mut self,
        session: &mut Session,
        region: &str,
        window: PageWindow,
        renderer: &mut impl Renderer,
    ) -> Ticket {
        let ticket = self.sequencer.issue();
        tracing::info!(
            "Loading region '{}' (limit {}, offset {}) {}",
            region,
            window.limit,
            window.offset,
            ticket
        );

        session.set_target(region, window);
        session.page_mut().start_reload();
        renderer.data_table(DataView::Loading {
            region: region.to_string(),
        });
        ticket
    }

    pub async fn fetch<T: Transport>(
        client: &GeodeClient<T>,
        region: &str,
        window: PageWindow,
    ) -> Result<DataPage, ConsoleError> {
        let resp = client
            .region_page(region, window.limit, window.offset)
            .await?;
        if !resp.success {
            return Err(ConsoleError::Backend(
                resp.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| "Failed to load data".to_string()),
            ));
        }
        Ok(DataPage::from_response(region, window, resp))
    }

    /// Apply a finished load; returns false if it was superseded
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<DataPage, ConsoleError>,
        session: &mut Session,
        renderer: &mut impl Renderer,
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(
                "Discarding stale page load {} (latest {:?})",
                ticket,
                self.sequencer.latest()
            );
            return false;
        }

        let region = session.current_region().unwrap_or_default().to_string();
        match outcome {
            Ok(page) => {
                let view = if page.entries.is_empty() {
                    DataView::Empty {
                        region: region.clone(),
                    }
                } else {
                    DataView::Table(DataTableView::from_page(&page))
                };
                session.page_mut().set_data(page);
                renderer.data_table(view);
            }
            Err(e) => {
                tracing::warn!("Loading region '{}' failed: {}", region, e);
                let mut message = match &e {
                    ConsoleError::Transport(_) => format!("Failed to load data: {}", e),
                    _ => e.to_string(),
                };
                if session.is_awaiting(&region) {
                    message.push_str(" (region was just created and may still be propagating; refresh shortly)");
                }
                session.page_mut().fail(&message);
                renderer.data_table(DataView::Error { region, message });
            }
        }
        true
    }

    /// Retire the load in flight; its reply is discarded when it lands
    pub fn cancel(&mut self) {
        let ticket = self.sequencer.issue();
        tracing::debug!("Cancelled page load, latest is now {}", ticket);
    }

    /// One complete load: begin, fetch, complete
    pub async fn load<T: Transport>(
        &mut self,
        client: &GeodeClient<T>,
        session: &mut Session,
        region: &str,
        window: PageWindow,
        renderer: &mut impl Renderer,
    ) -> bool {
        let ticket = self.begin_load(session, region, window, renderer);
        let outcome = Self::fetch(client, region, window).await;
        self.complete(ticket, outcome, session, renderer)
    }

    /// Window after the displayed page, if there is more to show
    pub fn next_window(&self, session: &Session) -> Option<PageWindow> {
        let page = session.page().data()?;
        let next = u64::from(page.offset) + u64::from(page.limit);
        (next < page.total_size).then(|| PageWindow {
            limit: page.limit,
            offset: u32::try_from(next).unwrap_or(u32::MAX),
        })
    }

    /// Window before the current one, if not already at the start
    pub fn prev_window(&self, session: &Session) -> Option<PageWindow> {
        session.current_region()?;
        let window = session.window();
        (window.offset > 0).then(|| PageWindow {
            limit: window.limit,
            offset: window.offset.saturating_sub(window.limit),
        })
    }
}
