//! Actions for the geode-pilot TUI
//!
//! Components translate key presses into actions; the app either handles
//! them itself or forwards them to the console.

use geode_pilot_core::Command;

/// Actions that can be dispatched in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Cycle to the tab after the current one
    NextTab,
    /// Forward to the console
    Console(Command),
    Resize(u16, u16),
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Action::Console(command)
    }
}
