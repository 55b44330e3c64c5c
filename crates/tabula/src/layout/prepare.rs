//! Turning a logical row into its matrix of visual lines.

use crate::config::SectionConfig;
use crate::types::WrapMode;
use crate::width::{truncate, ELLIPSIS};

use super::wrap::{wrap_break, wrap_words};

/// Visual lines of one logical row: `lines[line][column]`.
pub type LineMatrix = Vec<Vec<String>>;

/// Content width available in a cell whose total width is limited to
/// `limit`, after padding. A present limit never yields less than one column.
pub fn content_width(limit: Option<usize>, padding_width: usize) -> Option<usize> {
    limit.map(|limit| limit.saturating_sub(padding_width).max(1))
}

/// Prepares one logical row.
///
/// `limits[c]` is the total width constraint for column `c`, if any. The
/// result has `columns` entries per line and as many lines as the tallest
/// cell; shorter cells are filled with empty strings.
pub fn prepare_row(
    cells: &[String],
    columns: usize,
    section: &SectionConfig,
    limits: &[Option<usize>],
    trim_space: bool,
) -> LineMatrix {
    let wrap = section.wrap_mode();
    let auto_format = section.auto_format_enabled();

    let per_column: Vec<Vec<String>> = (0..columns)
        .map(|col| {
            let raw = cells.get(col).map(String::as_str).unwrap_or("");
            let width = content_width(
                limits.get(col).copied().flatten(),
                section.padding_for(col).horizontal_width(),
            );
            prepare_cell(raw, wrap, width, auto_format, trim_space)
        })
        .collect();

    let height = per_column.iter().map(Vec::len).max().unwrap_or(1).max(1);
    (0..height)
        .map(|line| {
            per_column
                .iter()
                .map(|cell| cell.get(line).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Prepares one cell into its lines.
pub fn prepare_cell(
    raw: &str,
    wrap: WrapMode,
    width: Option<usize>,
    auto_format: bool,
    trim_space: bool,
) -> Vec<String> {
    let text = if trim_space { raw.trim() } else { raw };

    let mut lines = Vec::new();
    for piece in text.split('\n') {
        let piece = piece.strip_suffix('\r').unwrap_or(piece);
        let piece = if trim_space { piece.trim() } else { piece };
        let piece = if auto_format {
            title_case(piece)
        } else {
            piece.to_string()
        };
        match (wrap, width) {
            (WrapMode::None, _) | (_, None) => lines.push(piece),
            (WrapMode::Normal, Some(width)) => lines.extend(wrap_words(&piece, width)),
            (WrapMode::Break, Some(width)) => lines.extend(wrap_break(&piece, width)),
            (WrapMode::Truncate, Some(width)) => lines.push(truncate(&piece, width, ELLIPSIS)),
        }
    }
    lines
}

/// Splits an identifier into words and capitalizes each one.
///
/// Underscores, dashes, dots and whitespace separate words, as does a
/// lowercase letter or digit followed by an uppercase one.
///
/// ```rust
/// use tabula::layout::title_case;
///
/// assert_eq!(title_case("firstName"), "First Name");
/// assert_eq!(title_case("created_at"), "Created At");
/// ```
pub fn title_case(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in text.chars() {
        if matches!(ch, '_' | '-' | '.') || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
