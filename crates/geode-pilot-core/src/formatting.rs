//! Formatting utilities for consistent display across the application

use crate::constants::VALUE_PREVIEW_CHARS;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// How an entry value is shown: a table cell and the full text behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDisplay {
    /// Possibly truncated text for the table cell
    pub cell: String,
    /// Full serialization, for a detail pane
    pub detail: String,
}

/// Render an entry value for the data table
///
/// Strings are shown as-is. Anything else is serialized to JSON; when that
/// serialization is longer than [`VALUE_PREVIEW_CHARS`] characters the cell
/// keeps the first [`VALUE_PREVIEW_CHARS`] followed by `...`, and the detail
/// keeps everything.
///
/// # Examples
///
/// ```
/// use geode_pilot_core::formatting::format_value;
/// use serde_json::json;
///
/// assert_eq!(format_value(&json!("plain")).cell, "plain");
/// assert_eq!(format_value(&json!({"a": 1})).cell, r#"{"a":1}"#);
/// ```
pub fn format_value(value: &Value) -> ValueDisplay {
    match value {
        Value::String(s) => ValueDisplay {
            cell: s.clone(),
            detail: s.clone(),
        },
        other => {
            let serialized = other.to_string();
            ValueDisplay {
                cell: truncate_preview(&serialized, VALUE_PREVIEW_CHARS),
                detail: serde_json::to_string_pretty(other).unwrap_or(serialized),
            }
        }
    }
}

/// Keys are shown as bare text when they are strings, JSON otherwise
pub fn format_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keep the first `max_chars` characters and append `...` when cut
///
/// Counts characters, not bytes, so multi-byte text is never split.
///
/// # Examples
///
/// ```
/// use geode_pilot_core::formatting::truncate_preview;
///
/// assert_eq!(truncate_preview("Hello, World!", 5), "Hello...");
/// assert_eq!(truncate_preview("Short", 10), "Short");
/// ```
pub fn truncate_preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

/// Label for a region in the choice control, e.g. `orders (42 entries)`
pub fn region_choice_label(name: &str, size: u64) -> String {
    format!("{} ({} entries)", name, size)
}

/// Data table summary line
pub fn page_summary(total: u64, displayed: u64) -> String {
    format!("Total Records: {} | Displayed: {}", total, displayed)
}

/// Format a timestamp for display
///
/// Shows time only if today, otherwise shows date and time.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let local = timestamp.with_timezone(&chrono::Local);

    if timestamp.date_naive() == now.date_naive() {
        local.format("%H:%M:%S").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_values_are_not_truncated() {
        let long = "x".repeat(250);
        let display = format_value(&Value::String(long.clone()));
        assert_eq!(display.cell, long);
        assert_eq!(display.detail, long);
    }

    #[test]
    fn test_structured_value_truncation() {
        let value = json!({"payload": "y".repeat(200)});
        let display = format_value(&value);

        assert!(display.cell.ends_with("..."));
        assert_eq!(display.cell.chars().count(), VALUE_PREVIEW_CHARS + 3);
        assert!(display.detail.contains(&"y".repeat(200)));
    }

    #[test]
    fn test_short_structured_value() {
        let display = format_value(&json!([1, 2, 3]));
        assert_eq!(display.cell, "[1,2,3]");

        let display = format_value(&json!(null));
        assert_eq!(display.cell, "null");
    }

    #[test]
    fn test_truncate_preview_is_char_safe() {
        assert_eq!(truncate_preview("héllo wörld", 4), "héll...");
        assert_eq!(truncate_preview("abc", 3), "abc");
        assert_eq!(truncate_preview("", 3), "");
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key(&json!("1")), "1");
        assert_eq!(format_key(&json!(7)), "7");
        assert_eq!(format_key(&json!({"id": 1})), r#"{"id":1}"#);
    }

    #[test]
    fn test_labels() {
        assert_eq!(region_choice_label("orders", 42), "orders (42 entries)");
        assert_eq!(page_summary(1, 1), "Total Records: 1 | Displayed: 1");
    }
}
