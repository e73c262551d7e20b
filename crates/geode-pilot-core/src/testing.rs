//! Test helpers shared by the component tests

use crate::view::{
    ClusterInfoView, DataView, ProvisionFormView, RegionChoicesView, RegionGridView, Renderer,
    StatusIndicatorView,
};

/// Renderer that keeps every view-model it is handed, in order
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub statuses: Vec<StatusIndicatorView>,
    pub cluster_infos: Vec<ClusterInfoView>,
    pub grids: Vec<RegionGridView>,
    pub choices: Vec<RegionChoicesView>,
    pub tables: Vec<DataView>,
    pub forms: Vec<ProvisionFormView>,
}

impl RecordingRenderer {
    pub fn last_table(&self) -> Option<&DataView> {
        self.tables.last()
    }

    pub fn last_grid(&self) -> Option<&RegionGridView> {
        self.grids.last()
    }

    pub fn last_choices(&self) -> Option<&RegionChoicesView> {
        self.choices.last()
    }

    pub fn last_form(&self) -> Option<&ProvisionFormView> {
        self.forms.last()
    }
}

impl Renderer for RecordingRenderer {
    fn status_indicator(&mut self, view: StatusIndicatorView) {
        self.statuses.push(view);
    }

    fn cluster_info(&mut self, view: ClusterInfoView) {
        self.cluster_infos.push(view);
    }

    fn region_grid(&mut self, view: RegionGridView) {
        self.grids.push(view);
    }

    fn region_choices(&mut self, view: RegionChoicesView) {
        self.choices.push(view);
    }

    fn data_table(&mut self, view: DataView) {
        self.tables.push(view);
    }

    fn provision_form(&mut self, view: ProvisionFormView) {
        self.forms.push(view);
    }
}
