//! Session result types.

use editdata_core::RowId;

/// Result of creating a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCreated {
    /// Id allocated to the new row.
    pub new_row_id: RowId,
    /// Display text of each column's default; `None` where the column has none.
    pub default_values: Vec<Option<String>>,
}
