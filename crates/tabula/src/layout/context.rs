//! Per-line render contexts handed to a [`Renderer`](crate::render::Renderer).

use crate::types::{Align, MergeState, Padding, Section};
use crate::width::fill;

use super::merge::{span_width, MergedRow};

/// What a visual line holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Top padding line of a logical row.
    PadTop,
    /// A line of cell content.
    Content,
    /// Bottom padding line of a logical row.
    PadBottom,
}

/// Everything a renderer needs to draw one cell on one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellContext {
    pub content: String,
    /// Total cell width including padding. Zero means the cell is not drawn.
    pub width: usize,
    pub align: Align,
    pub padding: Padding,
    pub merge: MergeState,
}

impl CellContext {
    /// A cell with zero width takes no space, and neither does the separator
    /// in front of it.
    pub fn is_hidden(&self) -> bool {
        self.width == 0
    }

    /// Width left for content once the padding is placed.
    pub fn content_width(&self) -> usize {
        self.width.saturating_sub(self.padding.horizontal_width())
    }
}

/// One visual line of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineContext {
    pub section: Section,
    /// Logical row index within the section.
    pub row: usize,
    /// Visual line index within the logical row, padding lines included.
    pub line: usize,
    pub kind: LineKind,
    pub cells: Vec<CellContext>,
}

impl LineContext {
    /// True if a separator is drawn in front of column `col` on this line.
    ///
    /// Column 0 never has one; a column swallowed by a horizontal span
    /// does not either.
    pub fn separates(&self, col: usize) -> bool {
        col > 0
            && self
                .cells
                .get(col)
                .map_or(false, |cell| !cell.merge.is_absorbed())
    }
}

/// The complete, render-ready geometry of a table.
///
/// Lines run header first, then each body row line by line, then the
/// footer, as one sequence. [`Layout::previous`] and [`Layout::next`] walk
/// that sequence across section boundaries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub(crate) widths: Vec<usize>,
    pub(crate) lines: Vec<LineContext>,
}

impl Layout {
    /// Unified column widths (content plus padding), hidden columns at 0.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn columns(&self) -> usize {
        self.widths.len()
    }

    pub fn lines(&self) -> &[LineContext] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines belonging to one section.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &LineContext> + '_ {
        self.lines.iter().filter(move |line| line.section == section)
    }

    /// The line drawn directly above line `index`.
    pub fn previous(&self, index: usize) -> Option<&LineContext> {
        index.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// The line drawn directly below line `index`.
    pub fn next(&self, index: usize) -> Option<&LineContext> {
        self.lines.get(index + 1)
    }
}

/// Resolved per-column styling for one section.
pub(crate) struct SectionStyle {
    pub section: Section,
    pub aligns: Vec<Align>,
    pub paddings: Vec<Padding>,
}

/// Builds the visual lines of one section from its merged rows.
pub(crate) fn assemble_section(
    merged: &[MergedRow],
    style: &SectionStyle,
    widths: &[usize],
    separator: usize,
) -> Vec<LineContext> {
    let has_top = style.paddings.iter().any(|p| !p.top.is_empty());
    let has_bottom = style.paddings.iter().any(|p| !p.bottom.is_empty());
    let mut lines = Vec::new();

    for (row, merged_row) in merged.iter().enumerate() {
        let mut line_no = 0;
        let content_lines: Vec<Vec<CellContext>> = merged_row
            .lines
            .iter()
            .zip(&merged_row.merges)
            .map(|(content, merges)| content_cells(content, merges, style, widths, separator))
            .collect();

        if has_top {
            if let Some(first) = content_lines.first() {
                lines.push(LineContext {
                    section: style.section,
                    row,
                    line: line_no,
                    kind: LineKind::PadTop,
                    cells: pad_cells(first, style, |p| &p.top),
                });
                line_no += 1;
            }
        }

        let last = content_lines.last().cloned();
        for cells in content_lines {
            lines.push(LineContext {
                section: style.section,
                row,
                line: line_no,
                kind: LineKind::Content,
                cells,
            });
            line_no += 1;
        }

        if has_bottom {
            if let Some(last) = last {
                lines.push(LineContext {
                    section: style.section,
                    row,
                    line: line_no,
                    kind: LineKind::PadBottom,
                    cells: pad_cells(&last, style, |p| &p.bottom),
                });
            }
        }
    }
    lines
}

fn content_cells(
    content: &[String],
    merges: &[MergeState],
    style: &SectionStyle,
    widths: &[usize],
    separator: usize,
) -> Vec<CellContext> {
    content
        .iter()
        .enumerate()
        .map(|(col, text)| {
            let merge = merges.get(col).copied().unwrap_or_default();
            let width = if merge.is_absorbed() {
                0
            } else if merge.horizontal.present && merge.horizontal.start {
                span_width(widths, col, merge.horizontal.span, separator)
            } else {
                widths.get(col).copied().unwrap_or(0)
            };
            CellContext {
                content: text.clone(),
                width,
                align: style.aligns.get(col).copied().unwrap_or(Align::Left),
                padding: style.paddings.get(col).cloned().unwrap_or_default(),
                merge,
            }
        })
        .collect()
}

fn pad_cells(
    template: &[CellContext],
    style: &SectionStyle,
    glyph: impl Fn(&Padding) -> &String,
) -> Vec<CellContext> {
    template
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let padding = style.paddings.get(col).cloned().unwrap_or_default();
            CellContext {
                content: fill(glyph(&padding), cell.width),
                width: cell.width,
                align: cell.align,
                padding: Padding::none(),
                merge: cell.merge,
            }
        })
        .collect()
}
