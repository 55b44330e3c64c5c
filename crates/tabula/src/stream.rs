//! Streaming output: lines are written as rows arrive.
//!
//! A [`Streamer`] cannot look ahead, so column widths are fixed up front in
//! [`StreamConfig`](crate::config::StreamConfig) and every cell is truncated
//! to fit. Calls must follow `start → header? → row* → footer? → end`.
//!
//! ```rust
//! use tabula::config::ColumnWidths;
//! use tabula::{Config, Streamer};
//!
//! let config = Config::builder()
//!     .stream_columns(2)
//!     .stream_widths(ColumnWidths::global(6))
//!     .build();
//!
//! let mut stream = Streamer::new(Vec::new(), config);
//! stream.start().unwrap();
//! stream.header(["id", "name"]).unwrap();
//! stream.row(["1", "alexandra"]).unwrap();
//! stream.end().unwrap();
//!
//! let text = String::from_utf8(stream.into_inner().unwrap()).unwrap();
//! assert!(text.contains("│ 1    │ ale… │"));
//! ```

use std::io::Write;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Result, TableError};
use crate::layout::{self, LineContext};
use crate::render::{Blueprint, Renderer, RuleKind};
use crate::row::{ConverterCache, Row};
use crate::types::Section;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    NotStarted,
    Started,
    HeaderRendered,
    RowsRendered,
    FooterRendered,
    Ended,
}

impl StreamState {
    fn describe(self) -> &'static str {
        match self {
            StreamState::NotStarted => "not started",
            StreamState::Started => "started",
            StreamState::HeaderRendered => "past its header",
            StreamState::RowsRendered => "rendering rows",
            StreamState::FooterRendered => "past its footer",
            StreamState::Ended => "ended",
        }
    }
}

/// Writes a table line by line to `W`.
pub struct Streamer<W, R = Blueprint> {
    writer: Option<W>,
    renderer: R,
    config: Config,
    converters: Arc<ConverterCache>,
    state: StreamState,
    widths: Vec<usize>,
    rows: usize,
    last: Option<LineContext>,
}

impl<W: Write> Streamer<W> {
    /// A streamer drawing with the default [`Blueprint`].
    pub fn new(writer: W, config: Config) -> Self {
        Streamer::with_renderer(Some(writer), Blueprint::default(), config)
    }
}

impl<W: Write, R: Renderer> Streamer<W, R> {
    /// A streamer with an explicit renderer. The writer may be supplied
    /// later with [`Streamer::set_writer`].
    pub fn with_renderer(writer: Option<W>, renderer: R, config: Config) -> Self {
        Streamer {
            writer,
            renderer,
            config,
            converters: Arc::default(),
            state: StreamState::NotStarted,
            widths: Vec::new(),
            rows: 0,
            last: None,
        }
    }

    /// Share a converter cache with other tables or streamers.
    pub fn with_converters(mut self, converters: Arc<ConverterCache>) -> Self {
        self.converters = converters;
        self
    }

    pub fn set_writer(&mut self, writer: W) {
        self.writer = Some(writer);
    }

    /// Give back the writer.
    pub fn into_inner(self) -> Option<W> {
        self.writer
    }

    /// Fixed column widths, available once started.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    fn require(&self, op: &'static str, allowed: &[StreamState]) -> Result<()> {
        if !allowed.contains(&self.state) {
            return Err(TableError::StreamOrder {
                op,
                state: self.state.describe(),
            });
        }
        if self.writer.is_none() {
            return Err(TableError::NoWriter { op });
        }
        Ok(())
    }

    fn fixed_widths(&self) -> Result<Vec<usize>> {
        let stream = &self.config.stream;
        let columns = stream.column_count().ok_or(TableError::StreamWidths)?;
        Ok((0..columns)
            .map(|col| {
                let minimum = [&self.config.header, &self.config.row, &self.config.footer]
                    .iter()
                    .map(|section| section.padding_for(col).horizontal_width())
                    .max()
                    .unwrap_or(0)
                    + 1;
                stream.widths.get(col).unwrap_or(0).max(minimum)
            })
            .collect())
    }

    /// Fixes the column widths and draws the top border.
    pub fn start(&mut self) -> Result<()> {
        self.require("start", &[StreamState::NotStarted, StreamState::Ended])?;
        let widths = self.fixed_widths()?;
        tracing::debug!(?widths, "stream started");

        self.widths = widths;
        self.rows = 0;
        self.last = None;
        if self.renderer.draws(RuleKind::Top) {
            self.rule(RuleKind::Top, None)?;
        }
        self.state = StreamState::Started;
        Ok(())
    }

    /// Writes the header. Only valid directly after `start`.
    pub fn header(&mut self, row: impl Into<Row>) -> Result<()> {
        self.require("header", &[StreamState::Started])?;
        self.emit(Section::Header, 0, row)?;
        self.state = StreamState::HeaderRendered;
        Ok(())
    }

    /// Writes one body row.
    pub fn row(&mut self, row: impl Into<Row>) -> Result<()> {
        self.require(
            "row",
            &[
                StreamState::Started,
                StreamState::HeaderRendered,
                StreamState::RowsRendered,
            ],
        )?;
        self.emit(Section::Row, self.rows, row)?;
        self.rows += 1;
        self.state = StreamState::RowsRendered;
        Ok(())
    }

    /// Writes the footer. Nothing but `end` may follow.
    pub fn footer(&mut self, row: impl Into<Row>) -> Result<()> {
        self.require(
            "footer",
            &[
                StreamState::Started,
                StreamState::HeaderRendered,
                StreamState::RowsRendered,
            ],
        )?;
        self.emit(Section::Footer, 0, row)?;
        self.state = StreamState::FooterRendered;
        Ok(())
    }

    /// Draws the bottom border and flushes the writer.
    pub fn end(&mut self) -> Result<()> {
        self.require(
            "end",
            &[
                StreamState::Started,
                StreamState::HeaderRendered,
                StreamState::RowsRendered,
                StreamState::FooterRendered,
            ],
        )?;
        if self.renderer.draws(RuleKind::Bottom) {
            let last = self.last.take();
            self.rule(RuleKind::Bottom, last.as_ref())?;
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        tracing::debug!(rows = self.rows, "stream ended");
        self.state = StreamState::Ended;
        Ok(())
    }

    /// Forgets all progress so the stream can be started again.
    pub fn reset(&mut self) {
        self.state = StreamState::NotStarted;
        self.widths.clear();
        self.rows = 0;
        self.last = None;
    }

    fn emit(&mut self, section: Section, index: usize, row: impl Into<Row>) -> Result<()> {
        let cells = row.into().into_cells(&self.converters)?;
        let lines = layout::build_fixed(
            &cells,
            section,
            index,
            &self.config,
            &self.widths,
            self.renderer.frame(),
        );

        let Streamer {
            writer,
            renderer,
            widths,
            last,
            ..
        } = self;
        let renderer: &R = renderer;
        let widths: &[usize] = widths;
        let out: &mut dyn Write = match writer.as_mut() {
            Some(writer) => writer,
            None => return Err(TableError::NoWriter { op: section.name() }),
        };

        for line in lines {
            if let Some(above) = last.as_ref() {
                if let Some(kind) = RuleKind::between(above, &line).filter(|k| renderer.draws(*k)) {
                    renderer.rule(out, kind, Some(above), Some(&line), widths)?;
                }
            }
            renderer.line(out, &line)?;
            *last = Some(line);
        }
        Ok(())
    }

    fn rule(&mut self, kind: RuleKind, above: Option<&LineContext>) -> Result<()> {
        let out: &mut dyn Write = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return Err(TableError::NoWriter { op: "rule" }),
        };
        self.renderer.rule(out, kind, above, None, &self.widths)?;
        Ok(())
    }
}
