//! Batch tables: collect every row, then lay out and render in one pass.
//!
//! # Example
//!
//! ```rust
//! use tabula::{Config, MergeMode, Table};
//!
//! let config = Config::builder()
//!     .row(|r| r.merge(MergeMode::VERTICAL))
//!     .build();
//! let mut table = Table::with_config(config);
//! table.header(["Team", "Member"]).unwrap();
//! table.append(["core", "ana"]).unwrap();
//! table.append(["core", "bo"]).unwrap();
//!
//! let text = table.to_string();
//! assert!(text.contains("│ core │ ana    │"));
//! assert!(text.contains("│      │ bo     │"));
//! ```

use std::any::Any;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::layout::{self, Frame, Layout, Sections};
use crate::render::{Blueprint, Renderer};
use crate::row::{ConverterCache, Row, TabularRow};

/// A table that owns its rows until it is rendered.
///
/// Rows are stored as given. Every render lays the table out again from
/// scratch, so the same table can be rendered with different renderers or
/// after more rows were appended.
#[derive(Debug, Default)]
pub struct Table {
    config: Config,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    footer: Option<Vec<String>>,
    converters: Arc<ConverterCache>,
}

impl Table {
    /// An empty table with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Table {
            config,
            ..Self::default()
        }
    }

    /// Share a converter cache with other tables or streamers.
    pub fn with_converters(mut self, converters: Arc<ConverterCache>) -> Self {
        self.converters = converters;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration. Rows are kept.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn converters(&self) -> &Arc<ConverterCache> {
        &self.converters
    }

    /// Registers a converter so rows of type `T` can be appended with
    /// [`Row::custom`].
    pub fn register_converter<T, F>(&self, convert: F)
    where
        T: Any,
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        self.converters.register(convert);
    }

    fn convert(&self, row: impl Into<Row>) -> Result<Vec<String>> {
        row.into().into_cells(&self.converters)
    }

    /// Set the header row.
    pub fn header(&mut self, row: impl Into<Row>) -> Result<()> {
        self.header = Some(self.convert(row)?);
        Ok(())
    }

    /// Set the footer row.
    pub fn footer(&mut self, row: impl Into<Row>) -> Result<()> {
        self.footer = Some(self.convert(row)?);
        Ok(())
    }

    /// Append a body row. A row that cannot be converted is not added.
    pub fn append(&mut self, row: impl Into<Row>) -> Result<()> {
        let cells = self.convert(row)?;
        self.rows.push(cells);
        Ok(())
    }

    /// Append many rows, stopping at the first one that fails to convert.
    pub fn bulk<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        for row in rows {
            self.append(row)?;
        }
        Ok(())
    }

    /// Append a row from a [`TabularRow`] implementor.
    pub fn append_record<T: TabularRow + ?Sized>(&mut self, record: &T) {
        self.rows.push(record.to_row());
    }

    /// Append a row from any serializable value; struct fields keep their
    /// declaration order.
    pub fn append_serialize<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let row = Row::from_serialize(value)?;
        self.append(row)
    }

    /// Number of body rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop header, rows and footer. Configuration and converters stay.
    pub fn reset(&mut self) {
        self.header = None;
        self.rows.clear();
        self.footer = None;
    }

    fn sections(&self) -> Sections<'_> {
        Sections {
            header: self.header.as_deref(),
            rows: &self.rows,
            footer: self.footer.as_deref(),
        }
    }

    /// Lay the table out for a renderer with the given frame.
    pub fn layout(&self, frame: Frame) -> Layout {
        layout::build(self.sections(), &self.config, frame)
    }

    /// Render with the default [`Blueprint`].
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        self.render_with(&Blueprint::default(), out)
    }

    /// Render with any renderer.
    pub fn render_with<R, W>(&self, renderer: &R, out: &mut W) -> Result<()>
    where
        R: Renderer + ?Sized,
        W: Write,
    {
        let layout = self.layout(renderer.frame());
        tracing::debug!(
            rows = self.rows.len(),
            lines = layout.lines().len(),
            "rendering table"
        );
        renderer.render(&layout, out)?;
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.render(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}
