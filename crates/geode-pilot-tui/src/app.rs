//! Application state and main loop

use crate::action::Action;
use crate::screen::Screen;
use crate::tui::{self, Tui};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use geode_pilot_core::{Command, Console, ConsoleConfig, Tab, categorize_error};
use geode_rs::{GeodeClient, HttpTransport, Transport};
use std::time::Duration;

/// Main application state
pub struct App<T: Transport + 'static = HttpTransport> {
    /// Whether the application should quit
    should_quit: bool,
    /// How long to wait for input before redrawing
    tick_rate: Duration,
    console: Console<T, Screen>,
}

impl<T: Transport + 'static> App<T> {
    pub fn new(client: GeodeClient<T>, config: ConsoleConfig) -> Self {
        Self {
            should_quit: false,
            tick_rate: Duration::from_millis(100),
            console: Console::new(client, Screen::new(), config),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tab(&self) -> Tab {
        self.console.tab()
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        tui::install_panic_hook();
        let mut terminal = tui::init()?;

        let result = self.main_loop(&mut terminal).await;

        self.console.shutdown();
        tui::restore()?;

        result
    }

    async fn main_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        self.console.start();

        loop {
            let tab = self.console.tab();
            let mut draw_result = Ok(());
            terminal.draw(|frame| {
                draw_result = self.console.renderer_mut().draw(frame, tab);
            })?;
            draw_result?;

            // Handle events with timeout
            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = self.console.renderer_mut().handle_key(tab, key)? {
                            self.handle_action(action);
                        }
                    }
                    Event::Resize(w, h) => self.handle_action(Action::Resize(w, h)),
                    _ => {}
                }
            }

            // Apply finished background work (non-blocking)
            self.console.drain();

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::NextTab => {
                let next = self.console.tab().next();
                self.dispatch(Command::SwitchTab(next));
            }
            Action::Console(command) => self.dispatch(command),
            Action::Resize(w, h) => {
                tracing::debug!("Terminal resized to {}x{}", w, h);
            }
        }
    }

    fn dispatch(&mut self, command: Command) {
        if let Err(e) = self.console.handle(command) {
            // Rejections are already shown in the form
            if e.is_validation() {
                tracing::debug!("Rejected: {}", e);
            } else {
                tracing::warn!("Command failed ({}): {}", categorize_error(&e).label(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_rs::Method;
    use geode_rs::mock::MockTransport;
    use geode_pilot_core::RegionType;
    use serde_json::json;

    fn app(mock: MockTransport) -> App<MockTransport> {
        App::new(GeodeClient::new(mock), ConsoleConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_tab_cycles_and_refreshes_regions() {
        let mock = MockTransport::new();
        mock.reply_ok(Method::Get, "/regions/info", json!([]));
        let mut app = app(mock);

        app.handle_action(Action::NextTab);
        assert_eq!(app.tab(), Tab::Regions);
        app.handle_action(Action::NextTab);
        assert_eq!(app.tab(), Tab::Data);
        app.handle_action(Action::NextTab);
        assert_eq!(app.tab(), Tab::Cluster);

        tokio::time::sleep(Duration::from_millis(10)).await;
        let calls = app
            .console
            .client()
            .transport()
            .calls_to(Method::Get, "/regions/info");
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_create_keeps_running() {
        let mut app = app(MockTransport::new());
        app.handle_action(Action::Console(Command::OpenProvisionForm));
        app.handle_action(Action::Console(Command::SubmitProvision {
            name: "   ".to_string(),
            region_type: RegionType::Partition,
        }));
        assert!(!app.should_quit());
        assert!(app.console.client().transport().calls().is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = app(MockTransport::new());
        app.handle_action(Action::Quit);
        assert!(app.should_quit());
    }
}
