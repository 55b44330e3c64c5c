//! # Tabula - Text Table Layout
//!
//! `tabula` turns rows of strings into aligned, bordered text tables for
//! terminals and plain-text output. Cells can wrap over several lines, each
//! section (header, body rows, footer) is styled on its own, and identical
//! cells can be merged horizontally, vertically, or hierarchically.
//!
//! ## Core Concepts
//!
//! - [`Table`]: collects rows, lays them out, renders them in one pass
//! - [`Streamer`]: writes rows as they arrive against fixed column widths
//! - [`Config`]: immutable configuration, layered with [`Config::merge`]
//! - [`layout`]: the engine producing a [`Layout`] of per-line cell contexts
//! - [`render`]: the [`Renderer`](render::Renderer) seam and the bundled
//!   [`Blueprint`](render::Blueprint) border renderer
//!
//! ## Quick Start
//!
//! ```rust
//! use tabula::Table;
//!
//! let mut table = Table::new();
//! table.header(["Name", "Sign", "Rating"]).unwrap();
//! table.append(["A", "The Good", "500"]).unwrap();
//! table.append(["B", "The Very very Bad Man", "288"]).unwrap();
//!
//! let output = table.to_string();
//! assert!(output.starts_with("┌──────┬───────────────────────┬────────┐"));
//! assert!(output.contains("│ B    │ The Very very Bad Man │ 288    │"));
//! ```
//!
//! ## Merging
//!
//! ```rust
//! use tabula::{Config, MergeMode, Table};
//!
//! let config = Config::builder()
//!     .row(|r| r.merge(MergeMode::HORIZONTAL))
//!     .build();
//! let mut table = Table::with_config(config);
//! table.append(["A", "A"]).unwrap();
//! table.append(["A", "B"]).unwrap();
//!
//! let output = table.to_string();
//! assert!(output.contains("│ A     │\n"));
//! assert!(output.contains("│ A │ B │"));
//! ```

pub mod config;
mod error;
pub mod layout;
pub mod render;
mod row;
mod stream;
mod table;
mod types;
pub mod width;

pub use config::{Config, ConfigBuilder, SectionConfig};
pub use error::{Result, TableError};
pub use layout::{CellContext, Layout, LineContext, LineKind};
pub use row::{ConverterCache, Row, TabularRow};
pub use stream::Streamer;
pub use table::Table;
pub use types::{Align, MergeMode, MergeState, MergeStateOption, Padding, Section, WrapMode};
