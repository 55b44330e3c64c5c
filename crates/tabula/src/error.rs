//! Error types for table building and rendering.

use thiserror::Error;

/// Errors that can occur while building, rendering, or streaming a table.
///
/// Cosmetic misconfiguration (unknown alignment names, negative widths) is
/// never an error; those values are ignored and the defaults stay in place.
#[derive(Debug, Error)]
pub enum TableError {
    /// A row value could not be turned into a sequence of cell strings.
    #[error("cannot convert {type_name} into a table row")]
    Conversion { type_name: String },

    /// A streaming call arrived in a state that does not accept it.
    #[error("cannot call {op}() while the stream is {state}")]
    StreamOrder {
        op: &'static str,
        state: &'static str,
    },

    /// A streaming call needs a writer but none is configured.
    #[error("cannot call {op}() without a writer")]
    NoWriter { op: &'static str },

    /// Streaming was started without any fixed column widths.
    #[error("streaming requires fixed column widths")]
    StreamWidths,

    /// Configuration text was not valid JSON.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
