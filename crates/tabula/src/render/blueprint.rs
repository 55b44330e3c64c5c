use std::io::{self, Write};

use crate::layout::{Frame, LineContext};
use crate::width::{display_width, fill, pad};

use super::{BorderStyle, Renderer, Rendition, RuleKind, Symbols};

/// The default renderer: box-drawing borders from a [`Symbols`] theme.
///
/// Rule junctions are picked from the lines meeting at each point, so a
/// horizontal span gets no junction above or below its absorbed columns and
/// a vertically merged cell has no rule drawn across it.
#[derive(Clone, Debug)]
pub struct Blueprint<S = BorderStyle> {
    symbols: S,
    rendition: Rendition,
}

impl Default for Blueprint {
    fn default() -> Self {
        Blueprint::new(BorderStyle::default())
    }
}

impl Blueprint {
    /// A renderer for a built-in style, with the rendition that suits it.
    ///
    /// `None` draws no rules, `Markdown` drops the top, bottom and footer
    /// rules so the output stays a valid Markdown table.
    pub fn new(style: BorderStyle) -> Self {
        let rendition = match style {
            BorderStyle::None => Rendition::bare(),
            BorderStyle::Markdown => Rendition {
                top: false,
                bottom: false,
                footer_line: false,
                ..Rendition::default()
            },
            _ => Rendition::default(),
        };
        Blueprint {
            symbols: style,
            rendition,
        }
    }
}

impl<S: Symbols> Blueprint<S> {
    /// A renderer for a custom theme with the default rendition.
    pub fn with_symbols(symbols: S) -> Self {
        Blueprint {
            symbols,
            rendition: Rendition::default(),
        }
    }

    /// Replace the rendition.
    pub fn rendition(mut self, rendition: Rendition) -> Self {
        self.rendition = rendition;
        self
    }

    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    fn visible(widths: &[usize]) -> Vec<usize> {
        (0..widths.len()).filter(|&col| widths[col] > 0).collect()
    }

    /// Whether the rule runs across column `col`. It does not where a
    /// vertical group continues through it.
    fn crosses(below: Option<&LineContext>, above: Option<&LineContext>, col: usize) -> bool {
        match (above, below) {
            (Some(_), Some(below)) => !below
                .cells
                .get(col)
                .map_or(false, |cell| cell.merge.continues_from_above()),
            _ => true,
        }
    }

    fn point(&self, up: bool, down: bool, left: bool, right: bool) -> &str {
        if up || down || left || right {
            self.symbols.junction(up, down, left, right)
        } else {
            " "
        }
    }
}

impl<S: Symbols> Renderer for Blueprint<S> {
    fn frame(&self) -> Frame {
        let vertical = display_width(self.symbols.vertical());
        let edge = |on: bool| if on { vertical } else { 0 };
        Frame {
            left: edge(self.rendition.left),
            right: edge(self.rendition.right),
            separator: edge(self.rendition.column_separator),
        }
    }

    fn draws(&self, kind: RuleKind) -> bool {
        self.rendition.draws(kind)
    }

    fn line(&self, out: &mut dyn Write, line: &LineContext) -> io::Result<()> {
        let vertical = self.symbols.vertical();
        let mut text = String::new();
        if self.rendition.left {
            text.push_str(vertical);
        }

        let mut first = true;
        for cell in line.cells.iter().filter(|cell| !cell.is_hidden()) {
            if !first && self.rendition.column_separator {
                text.push_str(vertical);
            }
            first = false;
            text.push_str(&cell.padding.left);
            text.push_str(&pad(&cell.content, cell.content_width(), cell.align));
            text.push_str(&cell.padding.right);
        }

        if self.rendition.right {
            text.push_str(vertical);
        }
        writeln!(out, "{text}")
    }

    fn rule(
        &self,
        out: &mut dyn Write,
        kind: RuleKind,
        above: Option<&LineContext>,
        below: Option<&LineContext>,
        widths: &[usize],
    ) -> io::Result<()> {
        let visible = Self::visible(widths);
        let up_edge = above.is_some() || kind == RuleKind::Bottom;
        let down_edge = below.is_some() || kind == RuleKind::Top;
        let crosses: Vec<bool> = visible
            .iter()
            .map(|&col| Self::crosses(below, above, col))
            .collect();

        let mut text = String::new();
        if self.rendition.left {
            let right = crosses.first().copied().unwrap_or(true);
            text.push_str(self.point(up_edge, down_edge, false, right));
        }

        for (i, &col) in visible.iter().enumerate() {
            if i > 0 && self.rendition.column_separator {
                let up = above.map_or(kind == RuleKind::Bottom, |line| line.separates(col));
                let down = below.map_or(kind == RuleKind::Top, |line| line.separates(col));
                text.push_str(self.point(up, down, crosses[i - 1], crosses[i]));
            }
            if crosses[i] {
                text.push_str(&fill(self.symbols.horizontal(), widths[col]));
            } else {
                text.push_str(&" ".repeat(widths[col]));
            }
        }

        if self.rendition.right {
            let left = crosses.last().copied().unwrap_or(true);
            text.push_str(self.point(up_edge, down_edge, left, false));
        }
        writeln!(out, "{text}")
    }
}
