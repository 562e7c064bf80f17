//! Edit error types.

use editdata_core::{CoreError, RowId};
use thiserror::Error;

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors raised while editing a row or building its statement.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Column ordinal {ordinal} is out of range for a table with {column_count} columns")]
    ColumnIndexOutOfRange { ordinal: usize, column_count: usize },

    #[error("Column is not updatable: {column}")]
    ColumnNotUpdatable { column: String },

    #[error("Invalid value for column {column}: {message}")]
    InvalidCellValue { column: String, message: String },

    #[error("Column {column} has no value and no default")]
    MissingValue { column: String },

    #[error("Table {table} has no columns that can identify a row")]
    NoKeyColumns { table: String },

    #[error("Row {row_id} has no changed columns")]
    NoChanges { row_id: RowId },

    #[error("Row {row_id} is marked for deletion and cannot be edited")]
    RowMarkedForDeletion { row_id: RowId },

    #[error("Result set update failed: {0}")]
    ResultSet(#[from] CoreError),
}

impl EditError {
    pub fn column_index_out_of_range(ordinal: usize, column_count: usize) -> Self {
        Self::ColumnIndexOutOfRange {
            ordinal,
            column_count,
        }
    }

    pub fn column_not_updatable(column: impl Into<String>) -> Self {
        Self::ColumnNotUpdatable {
            column: column.into(),
        }
    }

    pub fn invalid_cell_value(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCellValue {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn missing_value(column: impl Into<String>) -> Self {
        Self::MissingValue {
            column: column.into(),
        }
    }

    pub fn no_key_columns(table: impl Into<String>) -> Self {
        Self::NoKeyColumns {
            table: table.into(),
        }
    }

    /// Whether this error is a metadata or value validation failure.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            EditError::ColumnIndexOutOfRange { .. } | EditError::ResultSet(_)
        )
    }
}
