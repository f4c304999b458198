//! Terminal column widths.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Fit `s` into `max_width` columns, ending in an ellipsis when it is cut.
/// Wide glyphs are never split.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out: String = s
        .chars()
        .take_while(|&ch| {
            used += char_width(ch);
            used <= budget
        })
        .collect();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
        assert_eq!(truncate_to_width("Hello", 0), "");
    }

    #[test]
    fn truncate_never_splits_wide_char() {
        let out = truncate_to_width("日本語", 4);
        assert_eq!(out, "日…");
        assert!(display_width(&out) <= 4);
    }
}
