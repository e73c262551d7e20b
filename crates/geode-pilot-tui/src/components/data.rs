//! Data tab
//!
//! A region choice line, the page table and a detail pane holding the full
//! value of the highlighted row. Choosing a region does not load it; Enter
//! does.

use crate::action::Action;
use crate::components::Component;
use crate::escape::sanitize;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use geode_pilot_core::{Command, SelectionStatus};
use geode_pilot_core::view::{DataTableView, DataView, RegionChoicesView};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState, Wrap,
    },
};

/// Placeholder shown while nothing is chosen
const CHOICE_PLACEHOLDER: &str = "-- Select a region --";

pub struct DataComponent {
    choices: RegionChoicesView,
    view: DataView,
    table_state: TableState,
    /// First visible line of the value pane
    detail_scroll: u16,
    /// Lines the value pane showed on the last draw
    detail_height: u16,
}

impl Default for DataComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DataComponent {
    pub fn new() -> Self {
        Self {
            choices: RegionChoicesView::default(),
            view: DataView::Idle,
            table_state: TableState::default(),
            detail_scroll: 0,
            detail_height: 0,
        }
    }

    pub fn set_choices(&mut self, choices: RegionChoicesView) {
        self.choices = choices;
    }

    pub fn set_view(&mut self, view: DataView) {
        let rows = match &view {
            DataView::Table(table) => table.rows.len(),
            _ => 0,
        };
        self.table_state.select((rows > 0).then_some(0));
        self.detail_scroll = 0;
        self.view = view;
    }

    pub fn view(&self) -> &DataView {
        &self.view
    }

    fn table(&self) -> Option<&DataTableView> {
        match &self.view {
            DataView::Table(table) => Some(table),
            _ => None,
        }
    }

    fn detail_lines(&self) -> usize {
        self.table()
            .zip(self.table_state.selected())
            .and_then(|(table, i)| table.rows.get(i))
            .map_or(0, |row| row.value.detail.lines().count())
    }

    fn scroll_detail_down(&mut self) {
        let half = (self.detail_height / 2).max(1);
        let max = u16::try_from(self.detail_lines().saturating_sub(1)).unwrap_or(u16::MAX);
        self.detail_scroll = self.detail_scroll.saturating_add(half).min(max);
    }

    fn scroll_detail_up(&mut self) {
        let half = (self.detail_height / 2).max(1);
        self.detail_scroll = self.detail_scroll.saturating_sub(half);
    }

    fn select_row(&mut self, index: usize) {
        if self.table_state.selected() != Some(index) {
            self.detail_scroll = 0;
        }
        self.table_state.select(Some(index));
    }

    fn draw_choice(&self, frame: &mut Frame, area: Rect) {
        let chosen = self
            .choices
            .selected
            .and_then(|i| self.choices.choices.get(i))
            .map(|c| sanitize(&c.label).into_owned());

        let value = match chosen {
            Some(label) => Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(CHOICE_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        };
        let mut spans = vec![
            Span::styled("Region: ", Style::default().fg(Color::DarkGray)),
            Span::raw("< "),
            value,
            Span::raw(" >"),
            Span::styled(
                format!("   ({} available)", self.choices.choices.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        match self.choices.current {
            SelectionStatus::AwaitingPropagation => spans.push(Span::styled(
                "   open region is still propagating",
                Style::default().fg(Color::Yellow),
            )),
            SelectionStatus::Unlisted => spans.push(Span::styled(
                "   open region is no longer listed",
                Style::default().fg(Color::Red),
            )),
            SelectionStatus::None | SelectionStatus::Listed => {}
        }
        let line = Line::from(spans);
        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM)),
            area,
        );
    }

    fn draw_body(&mut self, frame: &mut Frame, area: Rect) {
        let message = match &self.view {
            DataView::Idle => Some((
                "Choose a region with [ and ], then press Enter".to_string(),
                Color::DarkGray,
            )),
            DataView::Loading { region } => Some((
                format!("Loading {}...", sanitize(region)),
                Color::DarkGray,
            )),
            DataView::Error { message, .. } => Some((sanitize(message).into_owned(), Color::Red)),
            DataView::Empty { region } => Some((
                format!("Region {} has no entries", sanitize(region)),
                Color::DarkGray,
            )),
            DataView::Table(_) => None,
        };
        if let Some((text, color)) = message {
            let para = Paragraph::new(text)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true });
            frame.render_widget(para, area);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // Summary
            Constraint::Min(3),    // Table
            Constraint::Percentage(40), // Detail
        ])
        .split(area);

        let Some(table) = self.table() else {
            return;
        };

        frame.render_widget(
            Paragraph::new(Span::styled(
                table.summary.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );

        let rows: Vec<Row> = table
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(sanitize(&row.key).into_owned()),
                    Cell::from(sanitize(&row.value.cell).into_owned()),
                    Cell::from(sanitize(&row.value_type).into_owned())
                        .style(Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();

        let header = Row::new(vec![
            Cell::from("KEY"),
            Cell::from("VALUE"),
            Cell::from("TYPE"),
        ])
        .style(Style::default().add_modifier(Modifier::DIM))
        .bottom_margin(1);

        let widths = [
            Constraint::Percentage(25),
            Constraint::Percentage(55),
            Constraint::Percentage(20),
        ];

        let detail: Vec<Line> = self
            .table_state
            .selected()
            .and_then(|i| table.rows.get(i))
            .map(|row| {
                row.value
                    .detail
                    .lines()
                    .map(|l| Line::from(sanitize(l).into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        let detail_len = detail.len();

        let widget = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        frame.render_stateful_widget(widget, chunks[1], &mut self.table_state);

        let block = Block::default()
            .title(" Value ")
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(chunks[2]);
        self.detail_height = inner.height;

        let detail = Paragraph::new(detail)
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0))
            .block(block);
        frame.render_widget(detail, chunks[2]);

        if detail_len > usize::from(inner.height) {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None);
            let mut state = ScrollbarState::new(detail_len)
                .position(usize::from(self.detail_scroll))
                .viewport_content_length(usize::from(inner.height));
            frame.render_stateful_widget(scrollbar, inner, &mut state);
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);
        let (has_prev, has_next) = self
            .table()
            .map_or((false, false), |t| (t.has_prev, t.has_next));

        let line = Line::from(vec![
            Span::styled("[ [ ] ]", bold),
            Span::raw(" choose  "),
            Span::styled("[Enter]", bold),
            Span::raw(" load  "),
            Span::styled("[j/k]", bold),
            Span::raw(" row  "),
            Span::styled("[^d/^u]", bold),
            Span::raw(" value  "),
            Span::styled("[p]", if has_prev { bold } else { dim }),
            Span::styled(" prev  ", if has_prev { Style::default() } else { dim }),
            Span::styled("[n]", if has_next { bold } else { dim }),
            Span::styled(" next  ", if has_next { Style::default() } else { dim }),
            Span::styled("[r]", bold),
            Span::raw(" refresh"),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for DataComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let rows = self.table().map_or(0, |t| t.rows.len());
        match key.code {
            KeyCode::Char(']') => Ok(Some(Command::ChooseNextRegion.into())),
            KeyCode::Char('[') => Ok(Some(Command::ChoosePrevRegion.into())),
            KeyCode::Enter => Ok(self
                .choices
                .selected_name()
                .map(|_| Command::LoadChosen.into())),
            KeyCode::Char('n') | KeyCode::PageDown => Ok(Some(Command::NextPage.into())),
            KeyCode::Char('p') | KeyCode::PageUp => Ok(Some(Command::PrevPage.into())),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_detail_down();
                Ok(None)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_detail_up();
                Ok(None)
            }
            KeyCode::Char('j') | KeyCode::Down if rows > 0 => {
                let next = self.table_state.selected().map_or(0, |i| (i + 1).min(rows - 1));
                self.select_row(next);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up if rows > 0 => {
                let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
                self.select_row(prev);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_choice(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{char_key, contains, key, render};
    use geode_pilot_core::format_value;
    use geode_pilot_core::types::PageWindow;
    use geode_pilot_core::view::{DataRowView, RegionChoice};
    use serde_json::json;

    fn table(rows: Vec<DataRowView>) -> DataView {
        DataView::Table(DataTableView {
            region: "orders".to_string(),
            summary: format!("Total Records: {} | Displayed: {}", rows.len(), rows.len()),
            rows,
            window: PageWindow::first(100),
            has_prev: false,
            has_next: false,
        })
    }

    fn row(key: &str, value: serde_json::Value) -> DataRowView {
        DataRowView {
            key: key.to_string(),
            value: format_value(&value),
            value_type: "String".to_string(),
        }
    }

    #[test]
    fn test_markup_shown_literally() {
        let mut data = DataComponent::new();
        data.set_view(table(vec![row("k", json!("<script>alert(1)</script>"))]));
        let lines = render(&mut data, 100, 20);
        assert!(contains(&lines, "<script>alert(1)</script>"));
        assert!(contains(&lines, "Total Records: 1 | Displayed: 1"));
    }

    #[test]
    fn test_control_characters_do_not_reach_terminal() {
        let mut data = DataComponent::new();
        data.set_view(table(vec![row("evil\u{1b}[2J", json!("x"))]));
        let lines = render(&mut data, 100, 20);
        assert!(contains(&lines, "evil\\u{1b}[2J"));
    }

    #[test]
    fn test_detail_pane_holds_full_value() {
        let long = "x".repeat(150);
        let mut data = DataComponent::new();
        data.set_view(table(vec![row("k", json!({ "payload": long.clone() }))]));
        let lines = render(&mut data, 220, 20);
        let cell = format!("{{\"payload\":\"{}...", "x".repeat(88));
        assert!(contains(&lines, &cell));
        assert!(contains(&lines, &format!("\"payload\": \"{}\"", long)));
    }

    #[test]
    fn test_idle_prompt_and_placeholder() {
        let mut data = DataComponent::new();
        let lines = render(&mut data, 100, 10);
        assert!(contains(&lines, CHOICE_PLACEHOLDER));
        assert!(contains(&lines, "Choose a region"));
    }

    #[test]
    fn test_enter_loads_only_with_a_choice() {
        let mut data = DataComponent::new();
        assert_eq!(data.handle_key_event(key(KeyCode::Enter)).unwrap(), None);

        data.set_choices(RegionChoicesView {
            choices: vec![RegionChoice {
                name: "orders".to_string(),
                label: "orders (42 entries)".to_string(),
            }],
            selected: Some(0),
            current: SelectionStatus::None,
        });
        assert_eq!(
            data.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::Console(Command::LoadChosen))
        );
        assert_eq!(
            data.handle_key_event(char_key(']')).unwrap(),
            Some(Action::Console(Command::ChooseNextRegion))
        );
        let lines = render(&mut data, 100, 10);
        assert!(contains(&lines, "orders (42 entries)"));
    }

    fn wide_object() -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> =
            (0..20).map(|i| (format!("f{:02}", i), json!(i))).collect();
        serde_json::Value::Object(fields)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_detail_keeps_line_breaks() {
        let mut data = DataComponent::new();
        data.set_view(table(vec![row("k", wide_object())]));
        let lines = render(&mut data, 100, 40);
        assert!(contains(&lines, "\"f00\": 0,"));
        assert!(contains(&lines, "\"f01\": 1,"));
        assert!(!contains(&lines, "\\n"));
    }

    #[test]
    fn test_detail_scrolls() {
        let mut data = DataComponent::new();
        data.set_view(table(vec![row("a", wide_object()), row("b", json!(1))]));
        let lines = render(&mut data, 100, 20);
        assert!(contains(&lines, "\"f00\": 0,"));
        assert!(!contains(&lines, "\"f19\": 19"));

        for _ in 0..3 {
            data.handle_key_event(ctrl('d')).unwrap();
        }
        assert!(data.detail_scroll >= 3);
        let lines = render(&mut data, 100, 20);
        assert!(!contains(&lines, "\"f00\": 0,"));

        for _ in 0..40 {
            data.handle_key_event(ctrl('d')).unwrap();
        }
        assert_eq!(data.detail_scroll, 21);

        data.handle_key_event(ctrl('u')).unwrap();
        assert!(data.detail_scroll < 21);

        data.handle_key_event(char_key('j')).unwrap();
        assert_eq!(data.detail_scroll, 0);
    }

    #[test]
    fn test_flags_unlisted_open_region() {
        let mut data = DataComponent::new();
        data.set_choices(RegionChoicesView {
            choices: vec![],
            selected: None,
            current: SelectionStatus::Unlisted,
        });
        let lines = render(&mut data, 100, 10);
        assert!(contains(&lines, "open region is no longer listed"));

        data.set_choices(RegionChoicesView {
            current: SelectionStatus::AwaitingPropagation,
            ..RegionChoicesView::default()
        });
        let lines = render(&mut data, 100, 10);
        assert!(contains(&lines, "open region is still propagating"));
    }

    #[test]
    fn test_row_cursor_clamps() {
        let mut data = DataComponent::new();
        data.set_view(table(vec![row("a", json!(1)), row("b", json!(2))]));
        data.handle_key_event(char_key('j')).unwrap();
        data.handle_key_event(char_key('j')).unwrap();
        assert_eq!(data.table_state.selected(), Some(1));
        data.set_view(table(vec![row("c", json!(3))]));
        assert_eq!(data.table_state.selected(), Some(0));
    }
}
