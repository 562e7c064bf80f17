//! Cells and rows of a materialized result set.

use crate::{RowId, Value};

/// One cell of a row: the raw value plus the text a grid displays for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CellValue {
    /// The raw value.
    pub raw: Value,
    /// Text shown to the client.
    pub display: String,
    /// Whether the raw value is SQL NULL.
    pub is_null: bool,
}

impl CellValue {
    /// Create a cell whose display text is derived from the value.
    pub fn new(raw: Value) -> Self {
        let is_null = raw.is_null();
        let display = raw.to_string();
        Self {
            raw,
            display,
            is_null,
        }
    }

    /// Create a cell with explicit display text.
    pub fn with_display(raw: Value, display: impl Into<String>) -> Self {
        Self {
            is_null: raw.is_null(),
            raw,
            display: display.into(),
        }
    }

    /// A NULL cell.
    pub fn null() -> Self {
        Self::new(Value::Null)
    }
}

impl From<Value> for CellValue {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

/// A row of a result set, indexed by column ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Identifier of this row.
    pub id: RowId,
    /// Cells in column order.
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row.
    pub fn new(id: RowId, cells: Vec<CellValue>) -> Self {
        Self { id, cells }
    }

    /// Get a cell by ordinal.
    pub fn cell(&self, ordinal: usize) -> Option<&CellValue> {
        self.cells.get(ordinal)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Helper macro to build a row of cells from plain values.
#[macro_export]
macro_rules! cells {
    () => {
        Vec::<$crate::CellValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::CellValue::new($crate::Value::from($value))),+]
    };
}
