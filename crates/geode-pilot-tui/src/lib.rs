//! geode-pilot-tui: Terminal front end for geode-pilot
//!
//! Draws the view-models produced by `geode-pilot-core` with ratatui and
//! turns key presses into console commands.

pub mod action;
pub mod app;
pub mod components;
pub mod escape;
pub mod screen;
pub mod tui;
pub mod ui_ext;

pub use app::App;
