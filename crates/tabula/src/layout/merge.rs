//! Merge detection.
//!
//! Detectors read the prepared line matrices, which are never modified, and
//! write into a fresh [`MergedRow`] grid: merge annotations plus content with
//! the absorbed cells blanked. Rendering the same rows twice therefore always
//! detects the same groups.
//!
//! Empty cells and cells that are exactly `-` never take part in a merge.

use crate::types::{MergeMode, MergeState, MergeStateOption, Section};

use super::prepare::LineMatrix;

/// One logical row after merge detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedRow {
    /// Visual lines with absorbed cells blanked.
    pub lines: LineMatrix,
    /// Merge state per line, per column.
    pub merges: Vec<Vec<MergeState>>,
}

impl MergedRow {
    fn from_matrix(matrix: &LineMatrix) -> Self {
        MergedRow {
            lines: matrix.clone(),
            merges: matrix
                .iter()
                .map(|line| vec![MergeState::default(); line.len()])
                .collect(),
        }
    }

    fn blank_cell(&mut self, col: usize) {
        for line in &mut self.lines {
            if let Some(cell) = line.get_mut(col) {
                cell.clear();
            }
        }
    }

    fn stamp(&mut self, col: usize, kind: Kind, option: MergeStateOption) {
        for line in &mut self.merges {
            if let Some(state) = line.get_mut(col) {
                *kind.option_mut(state) = option;
            }
        }
    }

    fn first_state(&self, col: usize) -> MergeState {
        self.merges
            .first()
            .and_then(|line| line.get(col))
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Vertical,
    Hierarchical,
}

impl Kind {
    fn option_mut(self, state: &mut MergeState) -> &mut MergeStateOption {
        match self {
            Kind::Vertical => &mut state.vertical,
            Kind::Hierarchical => &mut state.hierarchical,
        }
    }
}

fn mergeable(content: &str) -> bool {
    let content = content.trim();
    !content.is_empty() && content != "-"
}

/// All lines of one cell as a single string.
///
/// With `trim` each line is trimmed and the lines are joined by a space;
/// without it surrounding whitespace is part of the content, so cells that
/// only differ in it do not match. Filler lines of shorter cells are skipped
/// either way.
fn joined(matrix: &LineMatrix, col: usize, trim: bool) -> String {
    let lines = matrix.iter().filter_map(|line| line.get(col));
    if trim {
        lines
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        lines
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs the detectors selected by `mode` over one section.
///
/// Horizontal detection applies to every section, with the lead merge added
/// for footers. Vertical and hierarchical detection only apply to body rows;
/// when both are requested the hierarchical detector runs alone. Columns
/// flagged in `hidden` are skipped by the hierarchical detector so they do
/// not break a block.
///
/// `trim_space` decides whether surrounding whitespace counts when vertical
/// and hierarchical detection compare cells. Horizontal detection always
/// compares trimmed content.
pub fn merge_section(
    rows: &[LineMatrix],
    mode: MergeMode,
    section: Section,
    hidden: &[bool],
    trim_space: bool,
) -> Vec<MergedRow> {
    let mut merged: Vec<MergedRow> = rows.iter().map(MergedRow::from_matrix).collect();
    let mut groups = 0;

    if mode.contains(MergeMode::HORIZONTAL) {
        let lead = section == Section::Footer;
        for (original, target) in rows.iter().zip(merged.iter_mut()) {
            for (line, (content, states)) in original
                .iter()
                .zip(target.lines.iter_mut().zip(target.merges.iter_mut()))
            {
                groups += merge_line(line, content, states, lead);
            }
        }
    }

    if section == Section::Row {
        if mode.contains(MergeMode::HIERARCHICAL) {
            groups += merge_hierarchical(rows, &mut merged, hidden, trim_space);
        } else if mode.contains(MergeMode::VERTICAL) {
            groups += merge_vertical(rows, &mut merged, trim_space);
        }
    }

    if !mode.is_empty() {
        tracing::debug!(section = section.name(), ?mode, groups, "merge detection finished");
    }
    merged
}

/// Horizontal detection on one visual line. Returns the number of groups.
fn merge_line(
    original: &[String],
    content: &mut [String],
    states: &mut [MergeState],
    lead: bool,
) -> usize {
    let columns = original.len();
    let mut groups = 0;
    let mut col = 0;

    if lead {
        let first = original.iter().position(|cell| !cell.trim().is_empty());
        if let Some(first) = first.filter(|&k| k > 0 && mergeable(original[k].trim())) {
            let key = original[first].trim();
            let mut end = first + 1;
            while end < columns && original[end].trim() == key {
                end += 1;
            }
            content[0] = original[first].clone();
            annotate_span(content, states, 0, end);
            groups += 1;
            col = end;
        }
    }

    while col < columns {
        let key = original[col].trim();
        let mut end = col + 1;
        if mergeable(key) {
            while end < columns && original[end].trim() == key {
                end += 1;
            }
        }
        if end - col >= 2 {
            annotate_span(content, states, col, end - col);
            groups += 1;
        }
        col = end;
    }
    groups
}

fn annotate_span(content: &mut [String], states: &mut [MergeState], start: usize, span: usize) {
    for col in start..start + span {
        states[col].horizontal = MergeStateOption {
            present: true,
            span,
            start: col == start,
            end: col == start + span - 1,
        };
        if col != start {
            content[col].clear();
        }
    }
}

/// Stamps a finished vertical or hierarchical group on rows `start..=end`.
fn close_group(merged: &mut [MergedRow], col: usize, start: usize, end: usize, kind: Kind) -> usize {
    let span = end + 1 - start;
    if span < 2 {
        return 0;
    }
    for row in start..=end {
        merged[row].stamp(
            col,
            kind,
            MergeStateOption {
                present: true,
                span,
                start: row == start,
                end: row == end,
            },
        );
    }
    1
}

fn merge_vertical(rows: &[LineMatrix], merged: &mut [MergedRow], trim: bool) -> usize {
    let columns = rows.first().and_then(|m| m.first()).map_or(0, Vec::len);
    let mut groups = 0;

    for col in 0..columns {
        let mut open: Option<(usize, String)> = None;
        for (row, matrix) in rows.iter().enumerate() {
            let current = joined(matrix, col, trim);
            if let Some((_, content)) = &open {
                if mergeable(&current) && *content == current {
                    merged[row].blank_cell(col);
                    continue;
                }
            }
            if let Some((start, _)) = open.take() {
                groups += close_group(merged, col, start, row - 1, Kind::Vertical);
            }
            if mergeable(&current) {
                open = Some((row, current));
            }
        }
        if let Some((start, _)) = open {
            groups += close_group(merged, col, start, rows.len() - 1, Kind::Vertical);
        }
    }
    groups
}

fn merge_hierarchical(
    rows: &[LineMatrix],
    merged: &mut [MergedRow],
    hidden: &[bool],
    trim: bool,
) -> usize {
    let columns = rows.first().and_then(|m| m.first()).map_or(0, Vec::len);
    let mut open: Vec<Option<usize>> = vec![None; columns];
    let mut groups = 0;
    let present = MergeStateOption {
        present: true,
        ..MergeStateOption::default()
    };

    for row in 1..rows.len() {
        let mut left_continued = true;
        for col in 0..columns {
            if hidden.get(col).copied().unwrap_or(false) {
                continue;
            }
            let current = joined(&rows[row], col, trim);
            let continues = left_continued
                && mergeable(&current)
                && current == joined(&rows[row - 1], col, trim);

            if !continues {
                left_continued = false;
                if let Some(start) = open[col].take() {
                    groups += close_group(merged, col, start, row - 1, Kind::Hierarchical);
                }
                continue;
            }

            if open[col].is_none() {
                if merged[row - 1].first_state(col).hierarchical.present {
                    tracing::warn!(
                        row,
                        col,
                        "hierarchical merge continues a block with no recorded start, assuming the previous row"
                    );
                }
                open[col] = Some(row - 1);
                merged[row - 1].stamp(col, Kind::Hierarchical, present);
            }
            merged[row].stamp(col, Kind::Hierarchical, present);
            merged[row].blank_cell(col);
        }
    }

    let last = rows.len().saturating_sub(1);
    for (col, start) in open.into_iter().enumerate() {
        if let Some(start) = start {
            groups += close_group(merged, col, start, last, Kind::Hierarchical);
        }
    }
    groups
}

/// Width of a horizontal span starting at `start`.
///
/// The members' widths are summed and every separator between two visible
/// members is added back. Hidden members (width 0) add nothing.
pub fn span_width(widths: &[usize], start: usize, span: usize, separator: usize) -> usize {
    let end = (start + span).min(widths.len());
    let members = &widths[start.min(end)..end];
    let visible = members.iter().filter(|w| **w > 0).count();
    members.iter().sum::<usize>() + visible.saturating_sub(1) * separator
}
