//! Component system for the geode-pilot TUI
//!
//! Each component owns the last view-model the console rendered into it and
//! draws it on demand.

pub mod cluster;
pub mod create_region;
pub mod data;
pub mod regions;
pub mod status_bar;

pub use cluster::ClusterComponent;
pub use create_region::CreateRegionComponent;
pub use data::DataComponent;
pub use regions::RegionsComponent;
pub use status_bar::StatusBarComponent;

use crate::action::Action;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

/// Trait for UI components
pub trait Component {
    /// Handle key events and optionally produce actions
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// True while the component wants every key, global shortcuts included
    fn captures_input(&self) -> bool {
        false
    }

    /// Render the component to the frame
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}

/// Center a `width` x `height` box inside `area`
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::Component;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn char_key(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    /// Draw a component on a test terminal and return the screen as lines
    pub fn render(component: &mut impl Component, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                component.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    pub fn buffer_lines(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    pub fn contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }
}
