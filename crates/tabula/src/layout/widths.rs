//! Column width calculation and normalization across sections.

use crate::config::SectionConfig;
use crate::types::WrapMode;
use crate::width::display_width;

use super::prepare::LineMatrix;
use super::Frame;

/// Widest total cell width (content plus padding) per column in a section.
///
/// A section without rows contributes zero for every column.
pub fn section_widths(rows: &[LineMatrix], columns: usize, section: &SectionConfig) -> Vec<usize> {
    let mut widths = vec![0; columns];
    if rows.is_empty() {
        return widths;
    }

    for (col, width) in widths.iter_mut().enumerate() {
        let padding = section.padding_for(col).horizontal_width();
        let content = rows
            .iter()
            .flat_map(|matrix| matrix.iter())
            .map(|line| line.get(col).map_or(0, |cell| display_width(cell)))
            .max()
            .unwrap_or(0);
        *width = content + padding;
    }
    widths
}

/// Unifies the per-section widths: each column gets the widest of the three.
pub fn normalize(header: &[usize], row: &[usize], footer: &[usize]) -> Vec<usize> {
    let columns = header.len().max(row.len()).max(footer.len());
    (0..columns)
        .map(|col| {
            [header, row, footer]
                .iter()
                .map(|widths| widths.get(col).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Columns with no non-blank content in any body row.
///
/// Returns nothing when there are no body rows, so a table that only has a
/// header keeps its columns.
pub fn empty_columns(rows: &[LineMatrix], columns: usize) -> Vec<usize> {
    if rows.is_empty() {
        return Vec::new();
    }
    (0..columns)
        .filter(|&col| {
            rows.iter().flat_map(|matrix| matrix.iter()).all(|line| {
                line.get(col)
                    .map_or(true, |cell| cell.trim().is_empty())
            })
        })
        .collect()
}

/// An even share of the table width per column, after the frame's glyphs.
pub fn table_share(max_width: usize, columns: usize, frame: &Frame) -> Option<usize> {
    if max_width == 0 || columns == 0 {
        return None;
    }
    let overhead = frame.left + frame.right + frame.separator * (columns - 1);
    Some((max_width.saturating_sub(overhead) / columns).max(1))
}

/// Width constraint per column for one section.
///
/// Every maximum that applies holds at once: the per-column and
/// section-wide maxima, and the table share unless wrapping is switched off
/// for the section. The tightest one wins.
pub fn section_limits(
    section: &SectionConfig,
    columns: usize,
    share: Option<usize>,
) -> Vec<Option<usize>> {
    let share = share.filter(|_| section.wrap_mode() != WrapMode::None);
    (0..columns)
        .map(|col| {
            match (section.max_widths.tightest(col), share) {
                (Some(max), Some(share)) => Some(max.min(share)),
                (max, share) => max.or(share),
            }
        })
        .collect()
}
