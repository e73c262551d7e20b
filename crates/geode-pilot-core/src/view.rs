//! View-models and the rendering seam
//!
//! Components never hand raw transport responses to the surface. They build
//! one of the view-models below from their own state and pass it by value to
//! the matching [`Renderer`] sink. Strings inside view-models are raw backend
//! text; escaping is the surface's job.

use crate::formatting::{
    ValueDisplay, format_timestamp, format_value, page_summary, region_choice_label,
};
use crate::indicators::{ConnectionState, HealthIndicator};
use crate::session::SelectionStatus;
use crate::types::{ClusterStatus, DataPage, PageWindow, RegionSummary, RegionType};

/// The painting surface
///
/// One method per sink. Implementations store or draw what they are given
/// and hold no business logic.
pub trait Renderer {
    fn status_indicator(&mut self, view: StatusIndicatorView);
    fn cluster_info(&mut self, view: ClusterInfoView);
    fn region_grid(&mut self, view: RegionGridView);
    fn region_choices(&mut self, view: RegionChoicesView);
    fn data_table(&mut self, view: DataView);
    fn provision_form(&mut self, view: ProvisionFormView);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIndicatorView {
    pub health: HealthIndicator,
    pub text: String,
}

impl StatusIndicatorView {
    pub fn from_status(status: &ClusterStatus) -> Self {
        let text = match status.state {
            ConnectionState::Connected => {
                format!("Connected - {} member(s)", status.member_count)
            }
            ConnectionState::Disconnected => "Disconnected".to_string(),
            ConnectionState::Error => format!(
                "Error: {}",
                status.error_message.as_deref().unwrap_or("Unknown error")
            ),
        };
        Self {
            health: status.state.into(),
            text,
        }
    }

    /// Shown before the first poll lands
    pub fn pending() -> Self {
        Self {
            health: HealthIndicator::Pending,
            text: "Connecting...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    /// Member name, or its id when unnamed
    pub title: String,
    pub id: String,
    pub host: String,
    pub groups: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfoView {
    pub status_label: String,
    pub cache_name: String,
    pub member_count: u64,
    pub members: Vec<MemberView>,
    /// Set when not connected; replaces the member list
    pub error: Option<String>,
    pub note: Option<String>,
    pub observed_at: String,
}

impl ClusterInfoView {
    pub fn from_status(status: &ClusterStatus) -> Self {
        let error = (!status.state.is_connected()).then(|| {
            status
                .error_message
                .clone()
                .unwrap_or_else(|| "Unable to connect to the Geode cluster".to_string())
        });

        let members = status
            .members
            .iter()
            .map(|m| MemberView {
                title: m.name.clone().unwrap_or_else(|| m.id.clone()),
                id: m.id.clone(),
                host: m.host.clone().unwrap_or_else(|| "N/A".to_string()),
                groups: if m.groups.is_empty() {
                    "None".to_string()
                } else {
                    m.groups.join(", ")
                },
            })
            .collect();

        Self {
            status_label: status.state.label().to_string(),
            cache_name: status
                .cache_name
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            member_count: status.member_count,
            members,
            error,
            note: status.note.clone(),
            observed_at: format_timestamp(status.observed_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCardView {
    pub name: String,
    pub size_label: String,
    pub full_path: String,
}

impl From<&RegionSummary> for RegionCardView {
    fn from(region: &RegionSummary) -> Self {
        Self {
            name: region.name.clone(),
            size_label: format!("{} entries", region.size),
            full_path: region.full_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionGridView {
    Loading,
    Empty,
    Regions {
        cards: Vec<RegionCardView>,
        /// Created regions the backend has not listed yet
        awaiting: Vec<String>,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionChoice {
    pub name: String,
    pub label: String,
}

impl From<&RegionSummary> for RegionChoice {
    fn from(region: &RegionSummary) -> Self {
        Self {
            name: region.name.clone(),
            label: region_choice_label(&region.name, region.size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionChoicesView {
    pub choices: Vec<RegionChoice>,
    pub selected: Option<usize>,
    /// Standing of the opened region in the catalog
    pub current: SelectionStatus,
}

impl RegionChoicesView {
    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.choices.get(i))
            .map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRowView {
    pub key: String,
    pub value: ValueDisplay,
    pub value_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableView {
    pub region: String,
    pub summary: String,
    pub rows: Vec<DataRowView>,
    pub window: PageWindow,
    pub has_prev: bool,
    pub has_next: bool,
}

impl DataTableView {
    pub fn from_page(page: &DataPage) -> Self {
        let rows = page
            .entries
            .iter()
            .map(|entry| DataRowView {
                key: entry.key.clone(),
                value: format_value(&entry.value),
                value_type: entry.value_type.clone(),
            })
            .collect();

        let mut summary = page_summary(page.total_size, page.returned_count);
        if page.offset > 0 {
            summary.push_str(&format!(" | Offset: {}", page.offset));
        }

        Self {
            region: page.region_name.clone(),
            summary,
            rows,
            window: page.window(),
            has_prev: page.offset > 0,
            has_next: u64::from(page.offset) + page.returned_count < page.total_size,
        }
    }
}

/// What the data tab shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataView {
    /// No region chosen yet
    Idle,
    Loading { region: String },
    Error { region: String, message: String },
    /// Loaded, but the page has no entries
    Empty { region: String },
    Table(DataTableView),
}

impl DataView {
    pub fn region(&self) -> Option<&str> {
        match self {
            DataView::Idle => None,
            DataView::Loading { region }
            | DataView::Error { region, .. }
            | DataView::Empty { region } => Some(region),
            DataView::Table(table) => Some(&table.region),
        }
    }
}

/// Phase of the create-region workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionPhase {
    Idle,
    Submitting { region: String },
    Succeeded { region: String },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// One-line message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionFormView {
    pub visible: bool,
    pub phase: ProvisionPhase,
    pub region_types: Vec<RegionType>,
    pub notice: Option<Notice>,
}
