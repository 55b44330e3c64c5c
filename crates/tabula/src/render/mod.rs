//! Turning a [`Layout`] into text.
//!
//! The layout engine only decides geometry. A [`Renderer`] draws it: one
//! call per content line and one per horizontal rule. [`Blueprint`] is the
//! bundled renderer; it draws borders with any [`Symbols`] theme.
//!
//! ```rust
//! use tabula::render::{Blueprint, BorderStyle};
//! use tabula::Table;
//!
//! let mut table = Table::new();
//! table.header(["Name", "Qty"]).unwrap();
//! table.append(["apple", "3"]).unwrap();
//!
//! let mut out = Vec::new();
//! table
//!     .render_with(&Blueprint::new(BorderStyle::Ascii), &mut out)
//!     .unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(
//!     text,
//!     "+-------+-----+\n\
//!      | Name  | Qty |\n\
//!      +-------+-----+\n\
//!      | apple | 3   |\n\
//!      +-------+-----+\n"
//! );
//! ```

mod blueprint;
mod symbols;

pub use blueprint::Blueprint;
pub use symbols::{BorderStyle, Symbols};

use std::io::{self, Write};

use crate::layout::{Frame, Layout, LineContext};
use crate::types::Section;

/// The horizontal rules a table can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Above the first line.
    Top,
    /// Between the header and the first body line.
    Header,
    /// Between two body rows.
    Row,
    /// Between the last body line and the footer.
    Footer,
    /// Below the last line.
    Bottom,
}

impl RuleKind {
    /// The rule drawn between two adjacent lines, if any.
    pub fn between(above: &LineContext, below: &LineContext) -> Option<RuleKind> {
        match (above.section, below.section) {
            (Section::Header, Section::Header) | (Section::Footer, Section::Footer) => None,
            (Section::Header, _) => Some(RuleKind::Header),
            (_, Section::Footer) => Some(RuleKind::Footer),
            (Section::Row, Section::Row) if above.row != below.row => Some(RuleKind::Row),
            _ => None,
        }
    }
}

/// Which borders and separator lines to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rendition {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    /// Rule between header and body.
    pub header_line: bool,
    /// Rule between body and footer.
    pub footer_line: bool,
    /// Rules between body rows.
    pub between_rows: bool,
    /// Vertical separator between columns.
    pub column_separator: bool,
}

impl Default for Rendition {
    fn default() -> Self {
        Rendition {
            left: true,
            right: true,
            top: true,
            bottom: true,
            header_line: true,
            footer_line: true,
            between_rows: false,
            column_separator: true,
        }
    }
}

impl Rendition {
    /// Separator lines and column separators only, no outer frame.
    pub fn inner() -> Self {
        Rendition {
            left: false,
            right: false,
            top: false,
            bottom: false,
            ..Rendition::default()
        }
    }

    /// No lines at all, columns still separated.
    pub fn bare() -> Self {
        Rendition {
            header_line: false,
            footer_line: false,
            ..Rendition::inner()
        }
    }

    /// Whether `kind` is drawn.
    pub fn draws(&self, kind: RuleKind) -> bool {
        match kind {
            RuleKind::Top => self.top,
            RuleKind::Header => self.header_line,
            RuleKind::Row => self.between_rows,
            RuleKind::Footer => self.footer_line,
            RuleKind::Bottom => self.bottom,
        }
    }
}

/// Draws a laid-out table.
///
/// Implementors supply `line` and `rule`; the provided [`Renderer::render`]
/// walks the layout and calls them in order.
pub trait Renderer {
    /// Display widths of the glyphs around and between cells.
    fn frame(&self) -> Frame;

    /// Whether a rule of this kind is drawn.
    fn draws(&self, kind: RuleKind) -> bool;

    /// Writes one visual line, newline included.
    fn line(&self, out: &mut dyn Write, line: &LineContext) -> io::Result<()>;

    /// Writes one rule, newline included.
    ///
    /// `above` and `below` are the lines on either side, when there are any;
    /// `widths` are the unified column widths.
    fn rule(
        &self,
        out: &mut dyn Write,
        kind: RuleKind,
        above: Option<&LineContext>,
        below: Option<&LineContext>,
        widths: &[usize],
    ) -> io::Result<()>;

    /// Writes the whole layout.
    fn render(&self, layout: &Layout, out: &mut dyn Write) -> io::Result<()> {
        let lines = layout.lines();
        if self.draws(RuleKind::Top) {
            self.rule(out, RuleKind::Top, None, lines.first(), layout.widths())?;
        }
        for (index, line) in lines.iter().enumerate() {
            if let Some(above) = layout.previous(index) {
                if let Some(kind) = RuleKind::between(above, line).filter(|k| self.draws(*k)) {
                    self.rule(out, kind, Some(above), Some(line), layout.widths())?;
                }
            }
            self.line(out, line)?;
        }
        if self.draws(RuleKind::Bottom) {
            self.rule(out, RuleKind::Bottom, lines.last(), None, layout.widths())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LineKind;

    fn line(section: Section, row: usize) -> LineContext {
        LineContext {
            section,
            row,
            line: 0,
            kind: LineKind::Content,
            cells: Vec::new(),
        }
    }

    #[test]
    fn rules_between_sections() {
        let header = line(Section::Header, 0);
        let first = line(Section::Row, 0);
        let second = line(Section::Row, 1);
        let footer = line(Section::Footer, 0);

        assert_eq!(RuleKind::between(&header, &first), Some(RuleKind::Header));
        assert_eq!(RuleKind::between(&first, &second), Some(RuleKind::Row));
        assert_eq!(RuleKind::between(&first, &first), None);
        assert_eq!(RuleKind::between(&second, &footer), Some(RuleKind::Footer));
        assert_eq!(RuleKind::between(&header, &footer), Some(RuleKind::Header));
    }

    #[test]
    fn rendition_presets() {
        assert!(Rendition::default().draws(RuleKind::Top));
        assert!(!Rendition::default().draws(RuleKind::Row));
        assert!(Rendition::inner().draws(RuleKind::Header));
        assert!(!Rendition::inner().draws(RuleKind::Bottom));
        assert!(!Rendition::bare().draws(RuleKind::Footer));
    }
}
