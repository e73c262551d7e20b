//! Escaping of backend-supplied text
//!
//! Region names, keys and values come straight from the cluster. Ratatui
//! never interprets markup, so `<b>` stays `<b>`, but raw control bytes
//! would reach the terminal. They are replaced by visible escapes.

use std::borrow::Cow;

/// Make `text` safe to put in a terminal cell
///
/// ```
/// use geode_pilot_tui::escape::sanitize;
///
/// assert_eq!(sanitize("<script>"), "<script>");
/// assert_eq!(sanitize("a\u{1b}[2Jb"), "a\\u{1b}[2Jb");
/// ```
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.extend(c.escape_unicode()),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(sanitize("orders"), Cow::Borrowed("orders")));
    }

    #[test]
    fn test_markup_is_untouched() {
        let text = "<script>alert('x')</script> &amp;";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_control_characters_are_escaped() {
        assert_eq!(sanitize("line1\nline2"), "line1\\nline2");
        assert_eq!(sanitize("\u{7}bell"), "\\u{7}bell");
        assert!(!sanitize("\u{1b}]0;title\u{7}").chars().any(char::is_control));
    }
}
