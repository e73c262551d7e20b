//! Header with the tab strip and the connection indicator

use crate::components::Component;
use crate::escape::sanitize;
use crate::ui_ext::HealthIndicatorExt;
use color_eyre::Result;
use geode_pilot_core::Tab;
use geode_pilot_core::view::StatusIndicatorView;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

pub struct StatusBarComponent {
    status: StatusIndicatorView,
    tab: Tab,
}

impl Default for StatusBarComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            status: StatusIndicatorView::pending(),
            tab: Tab::default(),
        }
    }

    pub fn set_status(&mut self, status: StatusIndicatorView) {
        self.status = status;
    }

    pub fn status(&self) -> &StatusIndicatorView {
        &self.status
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }
}

impl Component for StatusBarComponent {
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (symbol, color) = self.status.health.symbol_and_color();
        let status_text = sanitize(&self.status.text).into_owned();
        let status_width = (status_text.chars().count() + 4) as u16;

        let chunks = Layout::horizontal([
            Constraint::Length(14),
            Constraint::Min(20),
            Constraint::Length(status_width),
        ])
        .split(inner);

        let title = Paragraph::new(Line::from(Span::raw(" geode-pilot ").bold().fg(Color::Cyan)));
        frame.render_widget(title, chunks[0]);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();
        let selected = Tab::ALL.iter().position(|t| *t == self.tab).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[1]);

        let status = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", symbol), Style::default().fg(color)),
            Span::styled(status_text, Style::default().fg(color)),
        ]));
        frame.render_widget(status, chunks[2]);

        Ok(())
    }
}
