//! The whole terminal screen
//!
//! [`Screen`] is the console's renderer: each view-model is handed to the
//! component that draws it. Key presses are routed to the modal overlay
//! first, then to global shortcuts, then to the active tab.

use crate::action::Action;
use crate::components::{
    ClusterComponent, Component, CreateRegionComponent, DataComponent, RegionsComponent,
    StatusBarComponent,
};
use crate::escape::sanitize;
use crate::ui_ext::NoticeLevelExt;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use geode_pilot_core::view::{
    ClusterInfoView, DataView, ProvisionFormView, RegionChoicesView, RegionGridView, Renderer,
    StatusIndicatorView,
};
use geode_pilot_core::{Command, Tab};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    text::Span,
    widgets::Paragraph,
};

#[derive(Default)]
pub struct Screen {
    status_bar: StatusBarComponent,
    cluster: ClusterComponent,
    regions: RegionsComponent,
    data: DataComponent,
    create_form: CreateRegionComponent,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_bar(&self) -> &StatusBarComponent {
        &self.status_bar
    }

    pub fn data(&self) -> &DataComponent {
        &self.data
    }

    fn active(&mut self, tab: Tab) -> &mut dyn Component {
        match tab {
            Tab::Cluster => &mut self.cluster,
            Tab::Regions => &mut self.regions,
            Tab::Data => &mut self.data,
        }
    }

    pub fn handle_key(&mut self, tab: Tab, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }
        if self.create_form.captures_input() {
            return self.create_form.handle_key_event(key);
        }
        let active = self.active(tab);
        if active.captures_input() {
            return active.handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::Quit)),
            KeyCode::Tab => Ok(Some(Action::NextTab)),
            KeyCode::Char('1') => Ok(Some(Command::SwitchTab(Tab::Cluster).into())),
            KeyCode::Char('2') => Ok(Some(Command::SwitchTab(Tab::Regions).into())),
            KeyCode::Char('3') => Ok(Some(Command::SwitchTab(Tab::Data).into())),
            KeyCode::Char('r') => Ok(Some(Command::Refresh.into())),
            KeyCode::Char('c') => Ok(Some(Command::OpenProvisionForm.into())),
            KeyCode::Esc => Ok(Some(Command::DismissNotice.into())),
            _ => active.handle_key_event(key),
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, tab: Tab) -> Result<()> {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.status_bar.set_tab(tab);
        self.status_bar.draw(frame, chunks[0])?;
        self.active(tab).draw(frame, chunks[1])?;

        if !self.create_form.is_visible()
            && let Some(notice) = self.create_form.notice()
        {
            let line = Paragraph::new(Span::styled(
                format!(" {}", sanitize(&notice.text)),
                Style::default().fg(notice.level.color()),
            ));
            frame.render_widget(line, chunks[2]);
        }

        self.create_form.draw(frame, area)?;
        Ok(())
    }
}

impl Renderer for Screen {
    fn status_indicator(&mut self, view: StatusIndicatorView) {
        self.status_bar.set_status(view);
    }

    fn cluster_info(&mut self, view: ClusterInfoView) {
        self.cluster.set_info(view);
    }

    fn region_grid(&mut self, view: RegionGridView) {
        self.regions.set_view(view);
    }

    fn region_choices(&mut self, view: RegionChoicesView) {
        self.data.set_choices(view);
    }

    fn data_table(&mut self, view: DataView) {
        self.data.set_view(view);
    }

    fn provision_form(&mut self, view: ProvisionFormView) {
        self.create_form.set_view(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{buffer_lines, char_key, contains, key};
    use geode_pilot_core::RegionType;
    use geode_pilot_core::view::{Notice, ProvisionPhase, RegionCardView};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(screen: &mut Screen, tab: Tab) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| {
                screen.draw(frame, tab).unwrap();
            })
            .unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    fn form(visible: bool, notice: Option<Notice>) -> ProvisionFormView {
        ProvisionFormView {
            visible,
            phase: ProvisionPhase::Idle,
            region_types: RegionType::ALL.to_vec(),
            notice,
        }
    }

    #[test]
    fn test_global_shortcuts() {
        let mut screen = Screen::new();
        assert_eq!(
            screen.handle_key(Tab::Cluster, char_key('q')).unwrap(),
            Some(Action::Quit)
        );
        assert_eq!(
            screen.handle_key(Tab::Cluster, char_key('2')).unwrap(),
            Some(Action::Console(Command::SwitchTab(Tab::Regions)))
        );
        assert_eq!(
            screen.handle_key(Tab::Data, char_key('c')).unwrap(),
            Some(Action::Console(Command::OpenProvisionForm))
        );
        assert_eq!(
            screen.handle_key(Tab::Data, key(KeyCode::Tab)).unwrap(),
            Some(Action::NextTab)
        );
    }

    #[test]
    fn test_open_form_takes_every_key() {
        let mut screen = Screen::new();
        screen.provision_form(form(true, None));

        assert_eq!(screen.handle_key(Tab::Regions, char_key('q')).unwrap(), None);
        assert_eq!(screen.handle_key(Tab::Regions, char_key('r')).unwrap(), None);
        assert_eq!(
            screen.handle_key(Tab::Regions, key(KeyCode::Enter)).unwrap(),
            Some(Action::Console(Command::SubmitProvision {
                name: "qr".to_string(),
                region_type: RegionType::Partition,
            }))
        );
        assert_eq!(
            screen
                .handle_key(
                    Tab::Regions,
                    KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
                )
                .unwrap(),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unhandled_keys_reach_active_tab() {
        let mut screen = Screen::new();
        screen.region_grid(RegionGridView::Regions {
            cards: vec![RegionCardView {
                name: "orders".to_string(),
                size_label: "42 entries".to_string(),
                full_path: "/orders".to_string(),
            }],
            awaiting: Vec::new(),
        });
        assert_eq!(
            screen.handle_key(Tab::Regions, key(KeyCode::Enter)).unwrap(),
            Some(Action::Console(Command::OpenRegion("orders".to_string())))
        );
    }

    #[test]
    fn test_notice_shown_after_form_closes() {
        let mut screen = Screen::new();
        screen.provision_form(form(
            false,
            Some(Notice::success("Region \"newRegion\" created successfully!")),
        ));
        let lines = draw(&mut screen, Tab::Regions);
        assert!(contains(&lines, "Region \"newRegion\" created successfully!"));
    }

    #[test]
    fn test_status_survives_tab_switch() {
        let mut screen = Screen::new();
        screen.status_indicator(StatusIndicatorView {
            health: geode_pilot_core::HealthIndicator::Error,
            text: "Disconnected".to_string(),
        });
        for tab in Tab::ALL {
            let lines = draw(&mut screen, tab);
            assert!(contains(&lines, "Disconnected"));
        }
    }
}
