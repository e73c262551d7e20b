//! UI extensions for geode-pilot-core types
//!
//! Provides ratatui-specific colors for core types, keeping the core crate
//! free of any terminal dependency.

use geode_pilot_core::HealthIndicator;
use geode_pilot_core::view::NoticeLevel;
use ratatui::style::Color;

/// Extension trait for HealthIndicator to provide ratatui colors
pub trait HealthIndicatorExt {
    fn color(&self) -> Color;

    /// Get symbol and color together (common pattern)
    fn symbol_and_color(&self) -> (&'static str, Color);
}

impl HealthIndicatorExt for HealthIndicator {
    fn color(&self) -> Color {
        match self {
            HealthIndicator::Healthy => Color::Green,
            HealthIndicator::Warning => Color::Yellow,
            HealthIndicator::Error => Color::Red,
            HealthIndicator::Pending => Color::Cyan,
            HealthIndicator::Unknown => Color::DarkGray,
        }
    }

    fn symbol_and_color(&self) -> (&'static str, Color) {
        (self.symbol(), self.color())
    }
}

/// Extension trait for NoticeLevel to provide ratatui colors
pub trait NoticeLevelExt {
    fn color(&self) -> Color;
}

impl NoticeLevelExt for NoticeLevel {
    fn color(&self) -> Color {
        match self {
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Error => Color::Red,
        }
    }
}
