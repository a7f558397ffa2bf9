//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Uses unicode width for accurate terminal column calculation, handling
/// wide characters (CJK, emoji) correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Replaces every character with a bullet.
pub fn mask(text: &str) -> String {
    "•".repeat(text.chars().count())
}

/// Keeps the tail of `text` that fits in `max_width` columns.
///
/// Used for input fields so the cursor end stays visible.
pub fn tail_fit(text: &str, max_width: usize) -> &str {
    if text.width() <= max_width {
        return text;
    }
    let mut width = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Johnson", 10), "Johnson");
        assert_eq!(truncate_with_ellipsis("Christopherson", 8), "Christo…");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("emilyspass"), "••••••••••");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_tail_fit() {
        assert_eq!(tail_fit("emilys", 10), "emilys");
        assert_eq!(tail_fit("averylongusername", 4), "name");
    }
}
