//! Regions tab
//!
//! Draws the catalog as a grid of cards. Enter opens the region in the data
//! tab, `d` asks for confirmation before dropping it.

use crate::action::Action;
use crate::components::{Component, centered};
use crate::escape::sanitize;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use geode_pilot_core::Command;
use geode_pilot_core::SelectableList;
use geode_pilot_core::view::{RegionCardView, RegionGridView};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 4;

pub struct RegionsComponent {
    view: RegionGridView,
    cards: SelectableList<RegionCardView>,
    awaiting: Vec<String>,
    /// Region waiting for a y/n answer before it is dropped
    confirm_drop: Option<String>,
}

impl Default for RegionsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionsComponent {
    pub fn new() -> Self {
        Self {
            view: RegionGridView::Loading,
            cards: SelectableList::default(),
            awaiting: Vec::new(),
            confirm_drop: None,
        }
    }

    pub fn set_view(&mut self, view: RegionGridView) {
        if let RegionGridView::Regions { cards, awaiting } = &view {
            let restored = self.cards.replace_preserving(cards.clone(), |c| c.name.clone());
            if !restored && !self.cards.is_empty() {
                self.cards.select(0);
            }
            self.awaiting = awaiting.clone();
        } else if matches!(view, RegionGridView::Empty) {
            self.cards = SelectableList::default();
            self.awaiting.clear();
        }
        self.view = view;
    }

    pub fn selected(&self) -> Option<&str> {
        self.cards.selected().map(|c| c.name.as_str())
    }

    fn columns(area: Rect) -> usize {
        usize::from((area.width / CARD_WIDTH).max(1))
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let columns = Self::columns(area);
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected = self.cards.selected_index().unwrap_or(0);
        let first_row = (selected / columns).saturating_sub(visible_rows - 1);

        let pending = self.awaiting.iter().map(|name| (name.as_str(), None));
        let cards = self
            .cards
            .iter_with_selection()
            .map(|(_, card, is_selected)| (card.name.as_str(), Some((card, is_selected))));

        for (i, (name, card)) in cards.chain(pending).enumerate() {
            let row = i / columns;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let x = area.x + (i % columns) as u16 * CARD_WIDTH;
            let y = area.y + (row - first_row) as u16 * CARD_HEIGHT;
            let rect = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(area);

            let (lines, border) = match card {
                Some((card, is_selected)) => (
                    vec![
                        Line::from(Span::raw(card.size_label.clone())),
                        Line::from(Span::styled(
                            sanitize(&card.full_path).into_owned(),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ],
                    if is_selected { Color::Cyan } else { Color::DarkGray },
                ),
                None => (
                    vec![Line::from(Span::styled(
                        "awaiting listing...",
                        Style::default().fg(Color::Yellow),
                    ))],
                    Color::Yellow,
                ),
            };

            let block = Block::default()
                .title(Span::styled(
                    format!(" {} ", sanitize(name)),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border));
            frame.render_widget(Paragraph::new(lines).block(block), rect);
        }
    }

    fn draw_confirmation(&self, frame: &mut Frame, area: Rect, region: &str) {
        let overlay = centered(area, 50, 7);
        frame.render_widget(Clear, overlay);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Drop region '{}'?", sanitize(region)),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  All of its entries will be destroyed.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "  [y]",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Confirm    "),
                Span::styled(
                    "[n]",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Cancel"),
            ]),
        ];
        let block = Block::default()
            .title(" Confirm Drop ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("[arrows]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" select  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" browse  "),
            Span::styled("[c]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" create  "),
            Span::styled("[d]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" drop  "),
            Span::styled("[r]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" refresh"),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for RegionsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(region) = self.confirm_drop.take() {
            return Ok(match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    Some(Command::DropRegion(region).into())
                }
                _ => None,
            });
        }

        match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Down => {
                self.cards.select_next();
                Ok(None)
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Up => {
                self.cards.select_prev();
                Ok(None)
            }
            KeyCode::Enter => Ok(self
                .selected()
                .map(|name| Command::OpenRegion(name.to_string()).into())),
            KeyCode::Char('d') => {
                self.confirm_drop = self.selected().map(str::to_string);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn captures_input(&self) -> bool {
        self.confirm_drop.is_some()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        match &self.view {
            RegionGridView::Loading => {
                let loading =
                    Paragraph::new("Loading regions...").style(Style::default().fg(Color::DarkGray));
                frame.render_widget(loading, chunks[0]);
            }
            RegionGridView::Empty => {
                let empty = Paragraph::new("No regions found. Press c to create one.")
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(empty, chunks[0]);
            }
            RegionGridView::Error(message) => {
                let error = Paragraph::new(sanitize(message).into_owned())
                    .style(Style::default().fg(Color::Red));
                frame.render_widget(error, chunks[0]);
            }
            RegionGridView::Regions { .. } => self.draw_grid(frame, chunks[0]),
        }
        self.draw_footer(frame, chunks[1]);

        if let Some(region) = &self.confirm_drop {
            self.draw_confirmation(frame, area, region);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{char_key, contains, key, render};

    fn card(name: &str, size: u64) -> RegionCardView {
        RegionCardView {
            name: name.to_string(),
            size_label: format!("{} entries", size),
            full_path: format!("/{}", name),
        }
    }

    fn grid(cards: Vec<RegionCardView>) -> RegionGridView {
        RegionGridView::Regions {
            cards,
            awaiting: Vec::new(),
        }
    }

    #[test]
    fn test_cards_rendered() {
        let mut regions = RegionsComponent::new();
        regions.set_view(RegionGridView::Regions {
            cards: vec![card("orders", 42)],
            awaiting: vec!["fresh".to_string()],
        });
        let lines = render(&mut regions, 90, 10);
        assert!(contains(&lines, "orders"));
        assert!(contains(&lines, "42 entries"));
        assert!(contains(&lines, "awaiting listing..."));
    }

    #[test]
    fn test_enter_opens_selected_region() {
        let mut regions = RegionsComponent::new();
        regions.set_view(grid(vec![card("orders", 1), card("users", 2)]));
        regions.handle_key_event(key(KeyCode::Right)).unwrap();

        let action = regions.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::Console(Command::OpenRegion("users".to_string())))
        );
    }

    #[test]
    fn test_selection_survives_refresh() {
        let mut regions = RegionsComponent::new();
        regions.set_view(grid(vec![card("orders", 1), card("users", 2)]));
        regions.handle_key_event(key(KeyCode::Right)).unwrap();
        regions.set_view(grid(vec![card("accounts", 1), card("orders", 1), card("users", 3)]));
        assert_eq!(regions.selected(), Some("users"));
    }

    #[test]
    fn test_drop_requires_confirmation() {
        let mut regions = RegionsComponent::new();
        regions.set_view(grid(vec![card("orders", 1)]));

        assert_eq!(regions.handle_key_event(char_key('d')).unwrap(), None);
        assert!(regions.captures_input());
        let lines = render(&mut regions, 90, 12);
        assert!(contains(&lines, "Drop region 'orders'?"));

        assert_eq!(regions.handle_key_event(char_key('n')).unwrap(), None);
        assert!(!regions.captures_input());

        regions.handle_key_event(char_key('d')).unwrap();
        let action = regions.handle_key_event(char_key('y')).unwrap();
        assert_eq!(
            action,
            Some(Action::Console(Command::DropRegion("orders".to_string())))
        );
    }
}
