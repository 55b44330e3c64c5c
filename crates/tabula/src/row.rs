//! Turning caller values into rows of cell strings.
//!
//! A [`Row`] is one of a small closed set of shapes: plain strings, JSON
//! scalars, or an arbitrary value that a registered converter knows how to
//! flatten. Converters live in a [`ConverterCache`] keyed by the value's
//! `TypeId`.
//!
//! ```rust
//! use tabula::{ConverterCache, Row};
//!
//! struct Point { x: i32, y: i32 }
//!
//! let cache = ConverterCache::new();
//! cache.register(|p: &Point| vec![p.x.to_string(), p.y.to_string()]);
//!
//! let cells = Row::custom(Point { x: 1, y: 2 }).into_cells(&cache).unwrap();
//! assert_eq!(cells, vec!["1", "2"]);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, TableError};

/// Types that know how to lay themselves out as a row.
///
/// # Example
///
/// ```rust
/// use tabula::TabularRow;
///
/// struct Task { id: u32, title: String }
///
/// impl TabularRow for Task {
///     fn to_row(&self) -> Vec<String> {
///         vec![self.id.to_string(), self.title.clone()]
///     }
/// }
///
/// let task = Task { id: 7, title: "Ship it".into() };
/// assert_eq!(task.to_row(), vec!["7", "Ship it"]);
/// ```
pub trait TabularRow {
    /// Converts this instance to a row of string values.
    fn to_row(&self) -> Vec<String>;
}

/// A row value before conversion to cell strings.
pub enum Row {
    /// Cells that are already strings.
    Text(Vec<String>),
    /// JSON scalars; strings, numbers and booleans are accepted, `null` is empty.
    Values(Vec<Value>),
    /// Anything else, resolved through a registered converter.
    Custom {
        type_id: TypeId,
        type_name: &'static str,
        value: Box<dyn Any + Send + Sync>,
    },
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Text(cells) => f.debug_tuple("Text").field(cells).finish(),
            Row::Values(values) => f.debug_tuple("Values").field(values).finish(),
            Row::Custom { type_name, .. } => f.debug_tuple("Custom").field(type_name).finish(),
        }
    }
}

impl Row {
    /// Wraps a value to be converted by a registered converter.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Row {
        Row::Custom {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Builds a row from a [`TabularRow`] implementor.
    pub fn from_record<T: TabularRow + ?Sized>(record: &T) -> Row {
        Row::Text(record.to_row())
    }

    /// Builds a row from any serializable value.
    ///
    /// Structs and maps contribute their field values in declaration order,
    /// sequences their elements, and a scalar becomes a one-cell row.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Row> {
        let value = serde_json::to_value(value).map_err(|_| TableError::Conversion {
            type_name: std::any::type_name::<T>().to_string(),
        })?;
        Ok(match value {
            Value::Array(values) => Row::Values(values),
            Value::Object(map) => Row::Values(map.into_iter().map(|(_, v)| v).collect()),
            scalar => Row::Values(vec![scalar]),
        })
    }

    /// Resolves the row into cell strings.
    pub fn into_cells(self, converters: &ConverterCache) -> Result<Vec<String>> {
        match self {
            Row::Text(cells) => Ok(cells),
            Row::Values(values) => values.iter().map(scalar_to_cell).collect(),
            Row::Custom {
                type_id,
                type_name,
                value,
            } => converters
                .lookup(type_id)
                .and_then(|convert| convert(value.as_ref()))
                .ok_or_else(|| TableError::Conversion {
                    type_name: type_name.to_string(),
                }),
        }
    }
}

fn scalar_to_cell(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) => Err(TableError::Conversion {
            type_name: "nested JSON array".to_string(),
        }),
        Value::Object(_) => Err(TableError::Conversion {
            type_name: "nested JSON object".to_string(),
        }),
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Row::Text(cells)
    }
}

impl From<Vec<&str>> for Row {
    fn from(cells: Vec<&str>) -> Self {
        Row::Text(cells.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Row {
    fn from(cells: &[&str]) -> Self {
        Row::Text(cells.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for Row {
    fn from(cells: &[String]) -> Self {
        Row::Text(cells.to_vec())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Row {
    fn from(cells: [S; N]) -> Self {
        Row::Text(cells.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::Values(values)
    }
}

type Converter = Arc<dyn Fn(&(dyn Any + Send + Sync)) -> Option<Vec<String>> + Send + Sync>;

/// Registered row converters, keyed by the runtime type they accept.
///
/// Registration takes the write lock; conversions only take the read lock,
/// so many threads can convert rows at once.
#[derive(Default)]
pub struct ConverterCache {
    converters: RwLock<HashMap<TypeId, Converter>>,
}

impl fmt::Debug for ConverterCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("ConverterCache")
            .field("converters", &count)
            .finish()
    }
}

impl ConverterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the converter for `T`, replacing any previous one.
    pub fn register<T, F>(&self, convert: F)
    where
        T: Any,
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        let converter: Converter = Arc::new(move |value| value.downcast_ref::<T>().map(&convert));
        self.converters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), converter);
    }

    /// True if a converter for `T` is registered.
    pub fn contains<T: Any>(&self) -> bool {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    fn lookup(&self, type_id: TypeId) -> Option<Converter> {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }
}
