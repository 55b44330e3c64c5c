//! The layout engine.
//!
//! [`build`] runs the whole pipeline for a batch table:
//!
//! 1. prepare every logical row into visual lines (trim, auto-format, wrap),
//! 2. measure each section and unify the widths column by column,
//! 3. hide empty columns when auto-hide is on,
//! 4. detect merges into a fresh annotated grid,
//! 5. assemble one [`LineContext`] per visual line.
//!
//! Each stage only reads the previous stage's output. Nothing here writes
//! text; that is the job of a [`Renderer`](crate::render::Renderer).

mod context;
mod merge;
mod prepare;
mod widths;
pub mod wrap;

pub use context::{CellContext, Layout, LineContext, LineKind};
pub use merge::{merge_section, span_width, MergedRow};
pub use prepare::{content_width, prepare_cell, prepare_row, title_case, LineMatrix};
pub use widths::{empty_columns, normalize, section_limits, section_widths, table_share};

use crate::config::{Config, Formatting, SectionConfig};
use crate::types::{MergeMode, Section, WrapMode};
use context::{assemble_section, SectionStyle};

/// Display widths of the glyphs a renderer draws around and between cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: usize,
    pub right: usize,
    pub separator: usize,
}

/// Raw cell strings of the three sections.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sections<'a> {
    pub header: Option<&'a [String]>,
    pub rows: &'a [Vec<String>],
    pub footer: Option<&'a [String]>,
}

impl Sections<'_> {
    /// Number of columns: the widest logical row of any section.
    pub fn columns(&self) -> usize {
        let header = self.header.map_or(0, <[String]>::len);
        let footer = self.footer.map_or(0, <[String]>::len);
        let rows = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        header.max(footer).max(rows)
    }
}

fn prepare_section(
    rows: &[&[String]],
    section: &SectionConfig,
    columns: usize,
    share: Option<usize>,
    trim_space: bool,
) -> Vec<LineMatrix> {
    let limits = section_limits(section, columns, share);
    rows.iter()
        .map(|cells| prepare_row(cells, columns, section, &limits, trim_space))
        .collect()
}

fn style_for(section: Section, config: &SectionConfig, columns: usize) -> SectionStyle {
    SectionStyle {
        section,
        aligns: (0..columns).map(|col| config.align_for(col)).collect(),
        paddings: (0..columns).map(|col| config.padding_for(col)).collect(),
    }
}

/// Lays out a table.
pub fn build(sections: Sections<'_>, config: &Config, frame: Frame) -> Layout {
    let columns = sections.columns();
    let share = table_share(config.max_width, columns, &frame);
    let trim = config.behavior.trim_space();

    let header_rows: Vec<&[String]> = sections.header.into_iter().collect();
    let body_rows: Vec<&[String]> = sections.rows.iter().map(Vec::as_slice).collect();
    let footer_rows: Vec<&[String]> = sections.footer.into_iter().collect();

    let header = prepare_section(&header_rows, &config.header, columns, share, trim);
    let body = prepare_section(&body_rows, &config.row, columns, share, trim);
    let footer = prepare_section(&footer_rows, &config.footer, columns, share, trim);

    let mut widths = normalize(
        &section_widths(&header, columns, &config.header),
        &section_widths(&body, columns, &config.row),
        &section_widths(&footer, columns, &config.footer),
    );

    let mut hidden = vec![false; columns];
    if config.behavior.auto_hide() {
        for col in empty_columns(&body, columns) {
            widths[col] = 0;
            hidden[col] = true;
        }
    }
    tracing::debug!(columns, ?widths, "column widths normalized");

    let mut lines = Vec::new();
    let parts = [
        (Section::Header, &header, &config.header, config.behavior.hide_header()),
        (Section::Row, &body, &config.row, false),
        (Section::Footer, &footer, &config.footer, config.behavior.hide_footer()),
    ];
    for (section, prepared, section_config, skip) in parts {
        if skip || prepared.is_empty() {
            continue;
        }
        let merged = merge_section(prepared, section_config.merge_mode(), section, &hidden, trim);
        let style = style_for(section, section_config, columns);
        lines.extend(assemble_section(&merged, &style, &widths, frame.separator));
    }

    tracing::debug!(lines = lines.len(), "layout assembled");
    Layout { widths, lines }
}

/// Lays out a single streamed line against fixed widths.
///
/// Content that does not fit is truncated with an ellipsis. Only horizontal
/// merges are detected; everything else needs rows that have not arrived.
pub fn build_fixed(
    cells: &[String],
    section: Section,
    row: usize,
    config: &Config,
    widths: &[usize],
    frame: Frame,
) -> Vec<LineContext> {
    let columns = widths.len();
    let section_config = config.section(section);
    let trim = config.behavior.trim_space();

    let truncating = SectionConfig {
        formatting: Formatting {
            wrap: Some(WrapMode::Truncate),
            ..section_config.formatting.clone()
        },
        ..section_config.clone()
    };
    let limits: Vec<Option<usize>> = widths.iter().map(|w| Some(*w)).collect();
    let prepared = vec![prepare_row(cells, columns, &truncating, &limits, trim)];

    let mode = section_config.merge_mode() & MergeMode::HORIZONTAL;
    let merged = merge_section(&prepared, mode, section, &[], trim);
    let style = style_for(section, section_config, columns);

    let mut lines = assemble_section(&merged, &style, widths, frame.separator);
    for line in &mut lines {
        line.row = row;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    const FRAME: Frame = Frame {
        left: 1,
        right: 1,
        separator: 1,
    };

    #[test]
    fn widths_unify_across_sections() {
        let header = strings(&["Name", "Qty"]);
        let rows = vec![strings(&["apple", "1"]), strings(&["kiwi", "12345"])];
        let footer = strings(&["", "Total"]);
        let layout = build(
            Sections {
                header: Some(&header),
                rows: &rows,
                footer: Some(&footer),
            },
            &Config::default(),
            FRAME,
        );

        assert_eq!(layout.widths(), &[7, 7]);
        assert_eq!(layout.lines().len(), 4);
        assert!(layout
            .lines()
            .iter()
            .all(|line| line.cells.iter().all(|cell| cell.width == 7)));
    }

    #[test]
    fn table_width_truncates_header() {
        let header = strings(&["Name", "This is a very long header"]);
        let rows = vec![strings(&["Bob", "short"])];
        let config = Config::builder()
            .max_width(30)
            .header(|h| h.wrap(WrapMode::Truncate))
            .build();
        let layout = build(
            Sections {
                header: Some(&header),
                rows: &rows,
                footer: None,
            },
            &config,
            FRAME,
        );

        let header_line = &layout.lines()[0];
        assert_eq!(header_line.cells[1].content, "This is a …");
        assert_eq!(layout.lines()[1].cells[1].content, "short");
    }

    #[test]
    fn auto_hide_drops_empty_columns() {
        let header = strings(&["a", "b", "c"]);
        let rows = vec![strings(&["1", "", "3"]), strings(&["4", " ", "6"])];
        let config = Config::builder().auto_hide(true).build();
        let layout = build(
            Sections {
                header: Some(&header),
                rows: &rows,
                footer: None,
            },
            &config,
            FRAME,
        );

        assert_eq!(layout.widths()[1], 0);
        assert!(layout.lines()[0].cells[1].is_hidden());
    }

    #[test]
    fn hidden_sections_keep_their_widths() {
        let header = strings(&["a much wider header"]);
        let rows = vec![strings(&["x"])];
        let config = Config::builder().hide_header(true).build();
        let layout = build(
            Sections {
                header: Some(&header),
                rows: &rows,
                footer: None,
            },
            &config,
            FRAME,
        );

        assert_eq!(layout.lines().len(), 1);
        assert_eq!(layout.widths(), &[21]);
    }

    #[test]
    fn horizontal_span_width_includes_separator() {
        let rows = vec![strings(&["same", "same"]), strings(&["a", "b"])];
        let config = Config::builder()
            .row(|r| r.merge(MergeMode::HORIZONTAL))
            .build();
        let layout = build(
            Sections {
                rows: &rows,
                ..Sections::default()
            },
            &config,
            FRAME,
        );

        let first = &layout.lines()[0];
        assert_eq!(first.cells[0].width, 6 + 6 + 1);
        assert_eq!(first.cells[1].width, 0);
    }

    #[test]
    fn empty_table_has_no_lines() {
        let layout = build(Sections::default(), &Config::default(), FRAME);
        assert!(layout.is_empty());
        assert_eq!(layout.columns(), 0);
    }

    #[test]
    fn fixed_lines_truncate_to_width() {
        let config = Config::default();
        let lines = build_fixed(
            &strings(&["a rather long value", "ok", "dropped"]),
            Section::Row,
            4,
            &config,
            &[8, 6],
            FRAME,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].row, 4);
        assert_eq!(lines[0].cells.len(), 2);
        assert_eq!(lines[0].cells[0].content, "a rat…");
        assert_eq!(lines[0].cells[1].content, "ok");
    }
}
