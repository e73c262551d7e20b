//! Create-region form
//!
//! A modal overlay with a name field and a region type selector. The form
//! only collects input; validation and submission belong to the console.

use crate::action::Action;
use crate::components::{Component, centered};
use crate::escape::sanitize;
use crate::ui_ext::NoticeLevelExt;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use geode_pilot_core::view::{Notice, ProvisionFormView, ProvisionPhase};
use geode_pilot_core::{Command, RegionType};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct CreateRegionComponent {
    view: ProvisionFormView,
    name: String,
    region_type: RegionType,
}

impl Default for CreateRegionComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateRegionComponent {
    pub fn new() -> Self {
        Self {
            view: ProvisionFormView {
                visible: false,
                phase: ProvisionPhase::Idle,
                region_types: RegionType::ALL.to_vec(),
                notice: None,
            },
            name: String::new(),
            region_type: RegionType::default(),
        }
    }

    pub fn set_view(&mut self, view: ProvisionFormView) {
        let opening = view.visible && !self.view.visible;
        let created = matches!(view.phase, ProvisionPhase::Succeeded { .. });
        if opening || created {
            self.name.clear();
            self.region_type = RegionType::default();
        }
        self.view = view;
    }

    pub fn is_visible(&self) -> bool {
        self.view.visible
    }

    /// Latest notice, shown in the footer once the form is closed
    pub fn notice(&self) -> Option<&Notice> {
        self.view.notice.as_ref()
    }

    fn is_submitting(&self) -> bool {
        matches!(self.view.phase, ProvisionPhase::Submitting { .. })
    }

    fn cycle_type(&mut self, forward: bool) {
        let types = &self.view.region_types;
        if types.is_empty() {
            return;
        }
        let i = types.iter().position(|t| *t == self.region_type).unwrap_or(0);
        let next = if forward {
            (i + 1) % types.len()
        } else {
            (i + types.len() - 1) % types.len()
        };
        self.region_type = types[next];
    }
}

impl Component for CreateRegionComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.view.visible {
            return Ok(None);
        }
        if key.code == KeyCode::Esc {
            return Ok(Some(Command::DismissProvisionForm.into()));
        }
        if self.is_submitting() {
            return Ok(None);
        }

        match key.code {
            KeyCode::Enter => {
                return Ok(Some(
                    Command::SubmitProvision {
                        name: self.name.clone(),
                        region_type: self.region_type,
                    }
                    .into(),
                ));
            }
            KeyCode::Tab | KeyCode::Down => self.cycle_type(true),
            KeyCode::BackTab | KeyCode::Up => self.cycle_type(false),
            KeyCode::Backspace => {
                self.name.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.name.clear();
            }
            KeyCode::Char(c) if !c.is_control() => self.name.push(c),
            _ => {}
        }
        Ok(None)
    }

    fn captures_input(&self) -> bool {
        self.view.visible
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if !self.view.visible {
            return Ok(());
        }

        let overlay = centered(area, 80, 12);
        frame.render_widget(Clear, overlay);

        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Name:  ", label),
                Span::styled(
                    format!("{}_", sanitize(&self.name)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Type:  ", label),
                Span::styled(
                    format!("< {} >", self.region_type),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(Span::styled(
                format!("         {}", self.region_type.description()),
                label,
            )),
            Line::from(""),
        ];

        if let Some(notice) = &self.view.notice {
            lines.push(Line::from(Span::styled(
                format!("  {}", sanitize(&notice.text)),
                Style::default().fg(notice.level.color()),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(""));

        let hint = if self.is_submitting() {
            Line::from(Span::styled("  Creating...   [Esc] close", label))
        } else {
            Line::from(vec![
                Span::styled("  [Enter]", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" create  "),
                Span::styled("[Tab]", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" type  "),
                Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" cancel"),
            ])
        };
        lines.push(hint);

        let block = Block::default()
            .title(" Create Region ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let para = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(para, overlay);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{char_key, contains, key, render};

    fn open() -> CreateRegionComponent {
        let mut form = CreateRegionComponent::new();
        form.set_view(ProvisionFormView {
            visible: true,
            phase: ProvisionPhase::Idle,
            region_types: RegionType::ALL.to_vec(),
            notice: None,
        });
        form
    }

    fn type_text(form: &mut CreateRegionComponent, text: &str) {
        for c in text.chars() {
            form.handle_key_event(char_key(c)).unwrap();
        }
    }

    #[test]
    fn test_hidden_form_ignores_keys() {
        let mut form = CreateRegionComponent::new();
        assert_eq!(form.handle_key_event(char_key('x')).unwrap(), None);
        assert!(!form.captures_input());
    }

    #[test]
    fn test_submit_carries_name_and_type() {
        let mut form = open();
        type_text(&mut form, "newRegion");
        form.handle_key_event(key(KeyCode::Tab)).unwrap();

        let action = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::Console(Command::SubmitProvision {
                name: "newRegion".to_string(),
                region_type: RegionType::PartitionRedundant,
            }))
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut form = open();
        assert_eq!(
            form.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::Console(Command::DismissProvisionForm))
        );
    }

    #[test]
    fn test_notice_and_description_shown() {
        let mut form = open();
        form.set_view(ProvisionFormView {
            visible: true,
            phase: ProvisionPhase::Failed,
            region_types: RegionType::ALL.to_vec(),
            notice: Some(Notice::error("Please enter a region name")),
        });
        let lines = render(&mut form, 100, 20);
        assert!(contains(&lines, "Please enter a region name"));
        assert!(contains(&lines, "< PARTITION >"));
        assert!(contains(&lines, RegionType::Partition.description()));
    }

    #[test]
    fn test_input_locked_while_submitting() {
        let mut form = open();
        type_text(&mut form, "abc");
        form.set_view(ProvisionFormView {
            visible: true,
            phase: ProvisionPhase::Submitting {
                region: "abc".to_string(),
            },
            region_types: RegionType::ALL.to_vec(),
            notice: None,
        });
        assert_eq!(form.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        type_text(&mut form, "zzz");
        assert_eq!(form.name, "abc");
    }
}
