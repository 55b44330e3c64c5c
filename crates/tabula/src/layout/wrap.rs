//! Line wrapping for a single line of cell content.
//!
//! Both functions take text without `\n` and a width of at least one column,
//! and always return at least one line.

use crate::width::{display_width, split_at_width, BREAK_MARKER};

/// Wraps `text` at word boundaries so each line fits in `width` columns.
///
/// Runs of whitespace collapse to a single space. A word wider than `width`
/// is kept whole on its own line rather than split mid-word; use
/// [`wrap_break`] when every line must fit.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    lines.push(current);
    lines
}

/// Hard-wraps `text` at grapheme boundaries, ending every forced break with
/// [`BREAK_MARKER`].
///
/// Each line, marker included, fits in `width` columns. When the marker
/// leaves no room, lines are cut one grapheme run at a time without a
/// marker. A grapheme wider than `width` ends the wrap: the remaining text
/// is emitted as one over-wide line.
pub fn wrap_break(text: &str, width: usize) -> Vec<String> {
    let marker_width = display_width(BREAK_MARKER);
    let mut lines = Vec::new();
    let mut rest = text;

    while display_width(rest) > width {
        if let Some((head, tail)) = split_at_width(rest, width.saturating_sub(marker_width)) {
            lines.push(format!("{head}{BREAK_MARKER}"));
            rest = tail;
            continue;
        }

        tracing::trace!(width, "break marker does not fit, cutting without marker");
        match split_at_width(rest, width) {
            Some((head, tail)) => {
                lines.push(head.to_string());
                rest = tail;
            }
            None => break,
        }
    }

    lines.push(rest.to_string());
    lines
}
