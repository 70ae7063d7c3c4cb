//! Result rows and cell values.
//!
//! Responsibilities:
//! - Define the typed cell value carried by result rows.
//! - Define the `ResultRow` capability used for field projection.
//! - Provide `Row`, an owned row built from pairs or a JSON object.
//!
//! Does NOT handle:
//! - Deciding which fields to read (see `formatters::project_rows`).
//!
//! Invariants:
//! - `CellValue::Null` renders as the empty string.
//! - Integral floats keep a trailing `.0` so they stay distinguishable from integers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single cell of a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CellValue::Text(s),
            // Nested structures are kept as compact JSON text
            other @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Integer(n) => Value::from(n),
            CellValue::Float(x) => serde_json::Number::from_f64(x)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Read access to a result row by field identifier.
pub trait ResultRow {
    /// The value of `field`, or None if the row does not expose it.
    fn value_of(&self, field: &str) -> Option<&CellValue>;
}

/// An owned result row: field identifiers mapped to cell values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Map<String, Value>")]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter. Replaces an existing value for `field`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        let field = field.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((field, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl ResultRow for Row {
    fn value_of(&self, field: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

impl From<serde_json::Map<String, Value>> for Row {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            cells: map.into_iter().map(|(k, v)| (k, CellValue::from(v))).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}
