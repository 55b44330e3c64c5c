//! Display-width metrics for cell content.
//!
//! Everything the layout engine measures goes through this module. Widths are
//! terminal columns, not bytes or chars: CJK and most emoji count as 2, combining
//! marks and other zero-width code points count as 0, and ANSI escape sequences
//! are skipped entirely.
//!
//! ```rust
//! use tabula::width::{display_width, truncate};
//!
//! assert_eq!(display_width("hello"), 5);
//! assert_eq!(display_width("日本"), 4);
//! assert_eq!(truncate("Hello World", 8, "…"), "Hello W…");
//! ```

use console::{measure_text_width, pad_str, Alignment};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::types::Align;

/// Marker appended to truncated content.
pub const ELLIPSIS: &str = "…";

/// Marker appended at every forced break in [`WrapMode::Break`](crate::WrapMode::Break).
pub const BREAK_MARKER: &str = "↩";

/// Returns the display width of a string, ignoring ANSI escape codes.
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Truncates `s` so that it fits in `max_width` columns.
///
/// Content that already fits is returned unchanged, which makes truncation
/// idempotent. Otherwise the content is cut to `max_width - width(ellipsis)`
/// and the ellipsis is appended. When `max_width` is smaller than the ellipsis
/// itself the content is hard-cut with no marker.
pub fn truncate(s: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let ellipsis_width = display_width(ellipsis);
    if max_width < ellipsis_width {
        return take_width(s, max_width).to_string();
    }

    let mut result = take_width(s, max_width - ellipsis_width).to_string();
    result.push_str(ellipsis);
    result
}

/// Pads `s` to `width` columns according to `align`.
///
/// `Align::None` pads like `Align::Left`. Content wider than `width` is
/// returned as is.
pub fn pad(s: &str, width: usize, align: Align) -> String {
    let alignment = match align {
        Align::Right => Alignment::Right,
        Align::Center => Alignment::Center,
        Align::Left | Align::None => Alignment::Left,
    };
    pad_str(s, width, alignment, None).into_owned()
}

/// Repeats `glyph` until it covers exactly `width` columns.
///
/// Glyphs wider than one column are repeated as far as they fit and the rest
/// is filled with spaces. An empty glyph yields spaces.
pub fn fill(glyph: &str, width: usize) -> String {
    let glyph_width = display_width(glyph);
    if glyph_width == 0 {
        return " ".repeat(width);
    }
    let count = width / glyph_width;
    let mut out = glyph.repeat(count);
    out.push_str(&" ".repeat(width - count * glyph_width));
    out
}

/// Returns the longest prefix of `s` (on grapheme boundaries) whose display
/// width does not exceed `max_width`.
///
/// ANSI escape sequences are copied through without counting toward width.
pub fn take_width(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    let mut in_escape = false;

    for (offset, grapheme) in s.grapheme_indices(true) {
        if grapheme.starts_with('\x1b') {
            in_escape = true;
            end = offset + grapheme.len();
            continue;
        }
        if in_escape {
            end = offset + grapheme.len();
            if grapheme.chars().any(|c| c.is_ascii_alphabetic() || c == '~') {
                in_escape = false;
            }
            continue;
        }

        let width = grapheme.width();
        if used + width > max_width {
            break;
        }
        used += width;
        end = offset + grapheme.len();
    }

    &s[..end]
}

/// Splits `s` after at most `max_width` columns, never inside a grapheme.
///
/// Returns `None` when not even the first grapheme fits, so callers can pick
/// their own fallback instead of looping forever.
pub fn split_at_width(s: &str, max_width: usize) -> Option<(&str, &str)> {
    let head = take_width(s, max_width);
    if head.is_empty() {
        None
    } else {
        Some((head, &s[head.len()..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn display_width_wide_and_zero_width() {
        assert_eq!(display_width("日本語"), 6);
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn display_width_ignores_ansi() {
        assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
    }

    #[test]
    fn truncate_fits_unchanged() {
        assert_eq!(truncate("hello", 5, ELLIPSIS), "hello");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("hello world", 6, ELLIPSIS), "hello…");
        assert_eq!(truncate("hello world", 8, "..."), "hello...");
    }

    #[test]
    fn truncate_hard_cuts_below_ellipsis_width() {
        assert_eq!(truncate("hello", 2, "..."), "he");
        assert_eq!(truncate("hello", 0, ELLIPSIS), "");
    }

    #[test]
    fn truncate_is_idempotent() {
        let once = truncate("a fairly long cell value", 10, ELLIPSIS);
        assert_eq!(truncate(&once, 10, ELLIPSIS), once);
    }

    #[test]
    fn truncate_wide_glyphs() {
        // 3 wide chars fill 6 columns, the ellipsis takes the seventh.
        assert_eq!(truncate("日本語テスト", 7, ELLIPSIS), "日本語…");
    }

    #[test]
    fn pad_alignments() {
        assert_eq!(pad("ab", 5, Align::Left), "ab   ");
        assert_eq!(pad("ab", 5, Align::Right), "   ab");
        assert_eq!(pad("ab", 6, Align::Center), "  ab  ");
        assert_eq!(pad("ab", 4, Align::None), "ab  ");
    }

    #[test]
    fn fill_repeats_glyph() {
        assert_eq!(fill("-", 4), "----");
        assert_eq!(fill("", 3), "   ");
        assert_eq!(fill("日", 5), "日日 ");
    }

    #[test]
    fn split_never_breaks_graphemes() {
        assert_eq!(split_at_width("日本語", 3), Some(("日", "本語")));
        assert_eq!(split_at_width("日本語", 1), None);
        assert_eq!(split_at_width("abc", 10), Some(("abc", "")));
    }
}
