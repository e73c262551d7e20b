//! Region catalog
//!
//! Holds the latest `/regions/info` listing as a full-replace snapshot, plus
//! the choice control's selection. Overlapping refreshes are allowed; the last
//! one to land wins. A failed refresh shows an error in the grid but keeps
//! the previous snapshot in memory.

use crate::async_state::AsyncState;
use crate::errors::ConsoleError;
use crate::selection::SelectableList;
use crate::session::{SelectionStatus, Session};
use crate::types::RegionSummary;
use crate::view::{RegionCardView, RegionChoice, RegionChoicesView, RegionGridView, Renderer};
use geode_rs::{GeodeClient, Transport};

#[derive(Debug, Default)]
pub struct RegionCatalog {
    snapshot: AsyncState<Vec<RegionSummary>>,
    choices: SelectableList<RegionChoice>,
    current: SelectionStatus,
}

impl RegionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions from the last successful refresh
    pub fn regions(&self) -> &[RegionSummary] {
        self.snapshot.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn state(&self) -> &AsyncState<Vec<RegionSummary>> {
        &self.snapshot
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions().iter().any(|r| r.name == name)
    }

    /// The snapshot as ordered choices, each labelled with its entry count
    pub fn selectable_list(&self) -> Vec<RegionChoice> {
        self.regions().iter().map(RegionChoice::from).collect()
    }

    /// Name currently chosen in the choice control
    pub fn chosen(&self) -> Option<&str> {
        self.choices.selected().map(|c| c.name.as_str())
    }

    /// Choose a region by name; false when it is not listed
    pub fn choose(&mut self, name: &str, renderer: &mut impl Renderer) -> bool {
        let found = self.choices.select_where(|c| c.name == name);
        if found {
            self.render_choices(renderer);
        }
        found
    }

    pub fn choose_next(&mut self, renderer: &mut impl Renderer) {
        self.choices.select_next();
        self.render_choices(renderer);
    }

    pub fn choose_prev(&mut self, renderer: &mut impl Renderer) {
        self.choices.select_prev();
        self.render_choices(renderer);
    }

    pub fn begin_refresh(&mut self, renderer: &mut impl Renderer) {
        self.snapshot.start_loading();
        if !self.snapshot.has_data() {
            renderer.region_grid(RegionGridView::Loading);
        }
    }

    pub async fn fetch<T: Transport>(
        client: &GeodeClient<T>,
    ) -> Result<Vec<RegionSummary>, ConsoleError> {
        let regions = client.regions().await?;
        Ok(regions.into_iter().map(RegionSummary::from).collect())
    }

    /// Install a refresh result and repaint the grid and the choice control
    pub fn apply(
        &mut self,
        result: Result<Vec<RegionSummary>, ConsoleError>,
        session: &mut Session,
        renderer: &mut impl Renderer,
    ) {
        match result {
            Ok(regions) => {
                tracing::debug!("Region catalog refreshed: {} regions", regions.len());
                session.reconcile(&regions);

                let items: Vec<RegionChoice> = regions.iter().map(RegionChoice::from).collect();
                let restored = self.choices.replace_preserving(items, |c| c.name.clone());
                if !restored && let Some(current) = session.current_region() {
                    self.choices.select_where(|c| c.name == current);
                }
                self.current = session.selection_status(&regions);
                self.snapshot.set_data(regions);

                self.render_grid(session, renderer);
                self.render_choices(renderer);
            }
            Err(e) => {
                tracing::warn!("Region catalog refresh failed: {}", e);
                self.snapshot.set_error(&e);
                renderer.region_grid(RegionGridView::Error(format!(
                    "Failed to load Regions: {}",
                    e
                )));
            }
        }
    }

    pub async fn refresh<T: Transport>(
        &mut self,
        client: &GeodeClient<T>,
        session: &mut Session,
        renderer: &mut impl Renderer,
    ) {
        self.begin_refresh(renderer);
        let result = Self::fetch(client).await;
        self.apply(result, session, renderer);
    }

    pub fn render_grid(&self, session: &Session, renderer: &mut impl Renderer) {
        let regions = self.regions();
        let awaiting: Vec<String> = session.awaiting().map(str::to_string).collect();
        let view = if regions.is_empty() && awaiting.is_empty() {
            RegionGridView::Empty
        } else {
            RegionGridView::Regions {
                cards: regions.iter().map(RegionCardView::from).collect(),
                awaiting,
            }
        };
        renderer.region_grid(view);
    }

    /// Re-check the opened region against the snapshot and repaint the choices
    pub fn track_selection(&mut self, session: &Session, renderer: &mut impl Renderer) {
        let current = session.selection_status(self.regions());
        if current != self.current {
            self.current = current;
            self.render_choices(renderer);
        }
    }

    fn render_choices(&self, renderer: &mut impl Renderer) {
        renderer.region_choices(RegionChoicesView {
            choices: self.choices.items().to_vec(),
            selected: self.choices.selected_index(),
            current: self.current,
        });
    }
}
