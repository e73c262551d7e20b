//! Cluster tab
//!
//! Shows the connection summary and the member list from the latest status
//! poll. When the cluster is not connected the member list is replaced by
//! the error.

use crate::action::Action;
use crate::components::Component;
use crate::escape::sanitize;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use geode_pilot_core::view::ClusterInfoView;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

#[derive(Default)]
pub struct ClusterComponent {
    info: Option<ClusterInfoView>,
    table_state: TableState,
}

impl ClusterComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_info(&mut self, info: ClusterInfoView) {
        let count = info.members.len();
        self.info = Some(info);
        match self.table_state.selected() {
            _ if count == 0 => self.table_state.select(None),
            Some(i) if i >= count => self.table_state.select(Some(count - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn info(&self) -> Option<&ClusterInfoView> {
        self.info.as_ref()
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect, info: &ClusterInfoView) {
        let label = Style::default().fg(Color::DarkGray);
        let status_color = if info.error.is_some() {
            Color::Red
        } else {
            Color::Green
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Status:   ", label),
                Span::styled(
                    info.status_label.clone(),
                    Style::default()
                        .fg(status_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Cache:    ", label),
                Span::raw(sanitize(&info.cache_name).into_owned()),
            ]),
            Line::from(vec![
                Span::styled("Members:  ", label),
                Span::raw(info.member_count.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Updated:  ", label),
                Span::raw(info.observed_at.clone()),
            ]),
        ];
        if let Some(note) = &info.note {
            lines.push(Line::from(Span::styled(
                sanitize(note).into_owned(),
                Style::default().fg(Color::Yellow),
            )));
        }

        let para = Paragraph::new(lines).block(
            Block::default()
                .title(" Cluster ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(para, area);
    }

    fn draw_members(&mut self, frame: &mut Frame, area: Rect) {
        let Some(info) = &self.info else {
            return;
        };
        let block = Block::default()
            .title(" Members ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if let Some(error) = &info.error {
            let para = Paragraph::new(sanitize(error).into_owned())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(para, area);
            return;
        }

        if info.members.is_empty() {
            let para = Paragraph::new("No members reported")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(para, area);
            return;
        }

        let rows: Vec<Row> = info
            .members
            .iter()
            .map(|m| {
                Row::new(vec![
                    Cell::from(sanitize(&m.title).into_owned()),
                    Cell::from(sanitize(&m.id).into_owned()),
                    Cell::from(sanitize(&m.host).into_owned()),
                    Cell::from(sanitize(&m.groups).into_owned()),
                ])
            })
            .collect();

        let header = Row::new(vec![
            Cell::from("NAME"),
            Cell::from("ID"),
            Cell::from("HOST"),
            Cell::from("GROUPS"),
        ])
        .style(Style::default().add_modifier(Modifier::DIM))
        .bottom_margin(1);

        let widths = [
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

impl Component for ClusterComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let count = self.info.as_ref().map_or(0, |i| i.members.len());
        if count == 0 {
            return Ok(None);
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = self.table_state.selected().map_or(0, |i| (i + 1) % count);
                self.table_state.select(Some(next));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = self
                    .table_state
                    .selected()
                    .map_or(0, |i| if i == 0 { count - 1 } else { i - 1 });
                self.table_state.select(Some(prev));
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let Some(info) = self.info.clone() else {
            let waiting = Paragraph::new("Waiting for the first status poll...")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(waiting, area);
            return Ok(());
        };

        let summary_height = if info.note.is_some() { 7 } else { 6 };
        let chunks =
            Layout::vertical([Constraint::Length(summary_height), Constraint::Min(3)]).split(area);

        self.draw_summary(frame, chunks[0], &info);
        self.draw_members(frame, chunks[1]);
        Ok(())
    }
}
