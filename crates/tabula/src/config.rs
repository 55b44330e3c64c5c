//! Table configuration.
//!
//! A [`Config`] is a plain immutable value. Layering is done with the pure
//! [`Config::merge`], which takes every field the override actually sets and
//! keeps the base for the rest. "Not set" is spelled `Align::None`, `None`,
//! `0` for widths, and an absent map entry.
//!
//! ```rust
//! use tabula::{Align, Config, MergeMode, WrapMode};
//!
//! let config = Config::builder()
//!     .max_width(60)
//!     .header(|h| h.align(Align::Left))
//!     .row(|r| r.wrap(WrapMode::Truncate).merge(MergeMode::VERTICAL))
//!     .auto_hide(true)
//!     .build();
//!
//! assert_eq!(config.header.align_for(0), Align::Left);
//! assert_eq!(config.footer.align_for(0), Align::Right);
//! assert!(config.behavior.auto_hide());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::{Align, MergeMode, Padding, Section, WrapMode};

/// A width per column with a global fallback. Zero means unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub global: usize,
    pub per_column: BTreeMap<usize, usize>,
}

impl ColumnWidths {
    /// A global width for every column.
    pub fn global(width: usize) -> Self {
        ColumnWidths {
            global: width,
            per_column: BTreeMap::new(),
        }
    }

    /// Adds a per-column width.
    pub fn column(mut self, col: usize, width: usize) -> Self {
        self.per_column.insert(col, width);
        self
    }

    /// The width for `col`: per-column entry first, then global.
    pub fn get(&self, col: usize) -> Option<usize> {
        self.per_column
            .get(&col)
            .copied()
            .filter(|w| *w > 0)
            .or(Some(self.global).filter(|w| *w > 0))
    }

    /// The smallest width that applies to `col`, per-column or global.
    ///
    /// Used for limits, where every constraint holds at once; [`get`](Self::get)
    /// is for widths, where the per-column entry overrides.
    pub fn tightest(&self, col: usize) -> Option<usize> {
        let column = self.per_column.get(&col).copied().filter(|w| *w > 0);
        let global = Some(self.global).filter(|w| *w > 0);
        match (column, global) {
            (Some(c), Some(g)) => Some(c.min(g)),
            (c, g) => c.or(g),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.global == 0 && self.per_column.values().all(|w| *w == 0)
    }

    fn merge(&self, over: &ColumnWidths) -> ColumnWidths {
        let mut per_column = self.per_column.clone();
        for (col, width) in &over.per_column {
            if *width > 0 {
                per_column.insert(*col, *width);
            }
        }
        ColumnWidths {
            global: if over.global > 0 {
                over.global
            } else {
                self.global
            },
            per_column,
        }
    }
}

/// Per-section formatting switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formatting {
    pub align: Align,
    pub wrap: Option<WrapMode>,
    pub merge: MergeMode,
    pub auto_format: Option<bool>,
}

impl Formatting {
    fn merge(&self, over: &Formatting) -> Formatting {
        Formatting {
            align: over.align.or(self.align),
            wrap: over.wrap.or(self.wrap),
            merge: if over.merge.is_empty() {
                self.merge
            } else {
                over.merge
            },
            auto_format: over.auto_format.or(self.auto_format),
        }
    }
}

/// Section padding with per-column overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellPadding {
    pub global: Option<Padding>,
    pub per_column: BTreeMap<usize, Padding>,
}

impl CellPadding {
    fn merge(&self, over: &CellPadding) -> CellPadding {
        let mut per_column = self.per_column.clone();
        per_column.extend(over.per_column.clone());
        CellPadding {
            global: over.global.clone().or_else(|| self.global.clone()),
            per_column,
        }
    }
}

/// Configuration of one section (header, rows, or footer).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub formatting: Formatting,
    pub padding: CellPadding,
    /// Maximum total cell width (content plus padding).
    pub max_widths: ColumnWidths,
    pub column_aligns: BTreeMap<usize, Align>,
}

impl SectionConfig {
    /// Effective alignment: column override, then section default, then left.
    pub fn align_for(&self, col: usize) -> Align {
        self.column_aligns
            .get(&col)
            .copied()
            .unwrap_or(Align::None)
            .or(self.formatting.align)
            .or(Align::Left)
    }

    /// Effective padding: column override, then section global, then default.
    pub fn padding_for(&self, col: usize) -> Padding {
        self.padding
            .per_column
            .get(&col)
            .or(self.padding.global.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.formatting.wrap.unwrap_or_default()
    }

    pub fn merge_mode(&self) -> MergeMode {
        self.formatting.merge
    }

    pub fn auto_format_enabled(&self) -> bool {
        self.formatting.auto_format.unwrap_or(false)
    }

    /// Set the section's default alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.formatting.align = align;
        self
    }

    /// Set the alignment of one column.
    pub fn column_align(mut self, col: usize, align: Align) -> Self {
        self.column_aligns.insert(col, align);
        self
    }

    /// Set the wrap mode.
    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.formatting.wrap = Some(wrap);
        self
    }

    /// Set the merge detectors.
    pub fn merge(mut self, merge: MergeMode) -> Self {
        self.formatting.merge = merge;
        self
    }

    /// Title-case identifiers such as `first_name` before layout.
    pub fn auto_format(mut self, enabled: bool) -> Self {
        self.formatting.auto_format = Some(enabled);
        self
    }

    /// Set the section-wide padding.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding.global = Some(padding);
        self
    }

    /// Set the padding of one column.
    pub fn column_padding(mut self, col: usize, padding: Padding) -> Self {
        self.padding.per_column.insert(col, padding);
        self
    }

    /// Set the maximum cell width for every column.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_widths.global = width;
        self
    }

    /// Set the maximum cell width of one column.
    pub fn column_max_width(mut self, col: usize, width: usize) -> Self {
        self.max_widths.per_column.insert(col, width);
        self
    }

    fn merge_with(&self, over: &SectionConfig) -> SectionConfig {
        let mut column_aligns = self.column_aligns.clone();
        for (col, align) in &over.column_aligns {
            if *align != Align::None {
                column_aligns.insert(*col, *align);
            }
        }
        SectionConfig {
            formatting: self.formatting.merge(&over.formatting),
            padding: self.padding.merge(&over.padding),
            max_widths: self.max_widths.merge(&over.max_widths),
            column_aligns,
        }
    }
}

/// Table-wide toggles. `None` means unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    pub auto_hide: Option<bool>,
    pub trim_space: Option<bool>,
    pub hide_header: Option<bool>,
    pub hide_footer: Option<bool>,
}

impl Behavior {
    /// Drop columns that have no content in any row.
    pub fn auto_hide(&self) -> bool {
        self.auto_hide.unwrap_or(false)
    }

    /// Trim surrounding whitespace from every cell.
    pub fn trim_space(&self) -> bool {
        self.trim_space.unwrap_or(true)
    }

    pub fn hide_header(&self) -> bool {
        self.hide_header.unwrap_or(false)
    }

    pub fn hide_footer(&self) -> bool {
        self.hide_footer.unwrap_or(false)
    }

    fn merge(&self, over: &Behavior) -> Behavior {
        Behavior {
            auto_hide: over.auto_hide.or(self.auto_hide),
            trim_space: over.trim_space.or(self.trim_space),
            hide_header: over.hide_header.or(self.hide_header),
            hide_footer: over.hide_footer.or(self.hide_footer),
        }
    }
}

/// Fixed geometry for streaming output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Column count; 0 derives it from `widths.per_column`.
    pub columns: usize,
    /// Total cell widths (content plus padding).
    pub widths: ColumnWidths,
}

impl StreamConfig {
    /// The column count fixed for a stream, if one can be determined.
    pub fn column_count(&self) -> Option<usize> {
        if self.columns > 0 {
            return Some(self.columns);
        }
        self.widths
            .per_column
            .iter()
            .filter(|(_, w)| **w > 0)
            .map(|(col, _)| col + 1)
            .max()
    }

    fn merge(&self, over: &StreamConfig) -> StreamConfig {
        StreamConfig {
            columns: if over.columns > 0 {
                over.columns
            } else {
                self.columns
            },
            widths: self.widths.merge(&over.widths),
        }
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Total table width; 0 means unlimited.
    pub max_width: usize,
    pub header: SectionConfig,
    pub row: SectionConfig,
    pub footer: SectionConfig,
    pub behavior: Behavior,
    pub stream: StreamConfig,
}

impl Default for Config {
    fn default() -> Self {
        let section = |align| SectionConfig::default().align(align).wrap(WrapMode::Normal);
        Config {
            max_width: 0,
            header: section(Align::Center),
            row: section(Align::Left),
            footer: section(Align::Right),
            behavior: Behavior::default(),
            stream: StreamConfig::default(),
        }
    }
}

impl Config {
    /// A config with nothing set, useful as an override layer.
    pub fn unset() -> Self {
        Config {
            max_width: 0,
            header: SectionConfig::default(),
            row: SectionConfig::default(),
            footer: SectionConfig::default(),
            behavior: Behavior::default(),
            stream: StreamConfig::default(),
        }
    }

    /// Start building a config on top of the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The configuration of one section.
    pub fn section(&self, section: Section) -> &SectionConfig {
        match section {
            Section::Header => &self.header,
            Section::Row => &self.row,
            Section::Footer => &self.footer,
        }
    }

    /// Layers `over` on top of `self`, field by field.
    ///
    /// Fields left unset in `over` keep the value from `self`; neither input
    /// is modified.
    pub fn merge(&self, over: &Config) -> Config {
        Config {
            max_width: if over.max_width > 0 {
                over.max_width
            } else {
                self.max_width
            },
            header: self.header.merge_with(&over.header),
            row: self.row.merge_with(&over.row),
            footer: self.footer.merge_with(&over.footer),
            behavior: self.behavior.merge(&over.behavior),
            stream: self.stream.merge(&over.stream),
        }
    }

    /// Loads a config from JSON, layered on the defaults.
    ///
    /// Malformed JSON is an error. Values that are merely wrong (an unknown
    /// alignment name, a negative width) are skipped with a warning and the
    /// default stays in place.
    pub fn from_json(text: &str) -> Result<Config> {
        let value: Value = serde_json::from_str(text)?;
        let mut over = Config::unset();

        if let Some(width) = value.get("max_width").and_then(|v| read_width(v, "max_width")) {
            over.max_width = width;
        }
        if let Some(section) = value.get("header") {
            over.header = read_section(section, "header");
        }
        if let Some(section) = value.get("row") {
            over.row = read_section(section, "row");
        }
        if let Some(section) = value.get("footer") {
            over.footer = read_section(section, "footer");
        }
        if let Some(behavior) = value.get("behavior") {
            let flag = |key: &str| read_flag(behavior, key, "behavior");
            over.behavior = Behavior {
                auto_hide: flag("auto_hide"),
                trim_space: flag("trim_space"),
                hide_header: flag("hide_header"),
                hide_footer: flag("hide_footer"),
            };
        }
        if let Some(stream) = value.get("stream") {
            if let Some(columns) = stream
                .get("columns")
                .and_then(|v| read_width(v, "stream.columns"))
            {
                over.stream.columns = columns;
            }
            over.stream.widths = read_widths(stream, "width", "column_widths", "stream");
        }

        Ok(Config::default().merge(&over))
    }
}

fn read_width(value: &Value, key: &str) -> Option<usize> {
    match value.as_i64() {
        Some(n) if n >= 0 => Some(n as usize),
        _ => {
            tracing::warn!(key, %value, "ignoring invalid width");
            None
        }
    }
}

fn read_flag(value: &Value, key: &str, scope: &str) -> Option<bool> {
    let flag = value.get(key)?;
    let parsed = flag.as_bool();
    if parsed.is_none() {
        tracing::warn!(scope, key, %flag, "ignoring non-boolean flag");
    }
    parsed
}

fn read_widths(value: &Value, global_key: &str, map_key: &str, scope: &str) -> ColumnWidths {
    let mut widths = ColumnWidths::default();
    if let Some(global) = value.get(global_key).and_then(|v| read_width(v, scope)) {
        widths.global = global;
    }
    if let Some(map) = value.get(map_key).and_then(Value::as_object) {
        for (key, width) in map {
            match (key.parse::<usize>(), read_width(width, scope)) {
                (Ok(col), Some(width)) => {
                    widths.per_column.insert(col, width);
                }
                (Err(_), _) => tracing::warn!(scope, %key, "ignoring non-numeric column key"),
                _ => {}
            }
        }
    }
    widths
}

fn read_section(value: &Value, scope: &str) -> SectionConfig {
    let mut section = SectionConfig::default();

    if let Some(name) = value.get("align").and_then(Value::as_str) {
        match Align::from_name(name) {
            Some(align) => section.formatting.align = align,
            None => tracing::warn!(scope, name, "ignoring unknown alignment"),
        }
    }
    if let Some(name) = value.get("wrap").and_then(Value::as_str) {
        match WrapMode::from_name(name) {
            Some(wrap) => section.formatting.wrap = Some(wrap),
            None => tracing::warn!(scope, name, "ignoring unknown wrap mode"),
        }
    }
    if let Some(name) = value.get("merge").and_then(Value::as_str) {
        match MergeMode::parse(name) {
            Some(merge) => section.formatting.merge = merge,
            None => tracing::warn!(scope, name, "ignoring unknown merge mode"),
        }
    }
    section.formatting.auto_format = read_flag(value, "auto_format", scope);

    if let Some(padding) = value.get("padding") {
        match serde_json::from_value::<Padding>(padding.clone()) {
            Ok(padding) => section.padding.global = Some(padding),
            Err(err) => tracing::warn!(scope, %err, "ignoring invalid padding"),
        }
    }
    section.max_widths = read_widths(value, "max_width", "column_max_widths", scope);

    if let Some(map) = value.get("column_aligns").and_then(Value::as_object) {
        for (key, name) in map {
            let col = key.parse::<usize>().ok();
            let align = name.as_str().and_then(Align::from_name);
            match (col, align) {
                (Some(col), Some(align)) => {
                    section.column_aligns.insert(col, align);
                }
                _ => tracing::warn!(scope, %key, "ignoring invalid column alignment"),
            }
        }
    }

    section
}

/// Fluent builder for [`Config`].
///
/// Collects overrides and layers them on [`Config::default`] in `build()`.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    over: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            over: Config::unset(),
        }
    }
}

impl ConfigBuilder {
    /// Set the total table width.
    pub fn max_width(mut self, width: usize) -> Self {
        self.over.max_width = width;
        self
    }

    /// Adjust the header section.
    pub fn header(mut self, f: impl FnOnce(SectionConfig) -> SectionConfig) -> Self {
        self.over.header = f(self.over.header);
        self
    }

    /// Adjust the row section.
    pub fn row(mut self, f: impl FnOnce(SectionConfig) -> SectionConfig) -> Self {
        self.over.row = f(self.over.row);
        self
    }

    /// Adjust the footer section.
    pub fn footer(mut self, f: impl FnOnce(SectionConfig) -> SectionConfig) -> Self {
        self.over.footer = f(self.over.footer);
        self
    }

    pub fn auto_hide(mut self, enabled: bool) -> Self {
        self.over.behavior.auto_hide = Some(enabled);
        self
    }

    pub fn trim_space(mut self, enabled: bool) -> Self {
        self.over.behavior.trim_space = Some(enabled);
        self
    }

    pub fn hide_header(mut self, hidden: bool) -> Self {
        self.over.behavior.hide_header = Some(hidden);
        self
    }

    pub fn hide_footer(mut self, hidden: bool) -> Self {
        self.over.behavior.hide_footer = Some(hidden);
        self
    }

    /// Set the fixed streaming widths.
    pub fn stream_widths(mut self, widths: ColumnWidths) -> Self {
        self.over.stream.widths = widths;
        self
    }

    /// Set the streaming column count.
    pub fn stream_columns(mut self, columns: usize) -> Self {
        self.over.stream.columns = columns;
        self
    }

    /// Build the config.
    pub fn build(self) -> Config {
        Config::default().merge(&self.over)
    }
}
