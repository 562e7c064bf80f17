//! Metadata error types.

use thiserror::Error;

/// Errors that can occur while building or reconciling table metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Table {table} has no columns")]
    NoColumns { table: String },

    #[error("Duplicate column name: {column} on table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("Table {table} has {expected} columns but the result set has {actual}")]
    ColumnCountMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column {ordinal} is {expected} in the table but {actual} in the result set")]
    ColumnNameMismatch {
        ordinal: usize,
        expected: String,
        actual: String,
    },

    #[error("Table not found: {table}")]
    TableNotFound { table: String },

    #[error("Metadata lookup failed: {message}")]
    Lookup { message: String },
}

impl MetadataError {
    pub fn no_columns(table: impl Into<String>) -> Self {
        Self::NoColumns {
            table: table.into(),
        }
    }

    pub fn duplicate_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn column_count_mismatch(table: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ColumnCountMismatch {
            table: table.into(),
            expected,
            actual,
        }
    }

    pub fn column_name_mismatch(
        ordinal: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ColumnNameMismatch {
            ordinal,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }
}

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;
