//! Result-set error types.

use crate::RowId;
use thiserror::Error;

/// Errors raised by a [`ResultSetCache`](crate::ResultSetCache).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The row does not exist or has been removed.
    #[error("row not found: {0}")]
    RowNotFound(RowId),

    /// The id has already been handed out by this result set.
    #[error("row id already in use: {0}")]
    RowIdInUse(RowId),

    /// A row was supplied with the wrong number of cells.
    #[error("row has {actual} cells but the result set has {expected} columns")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

impl CoreError {
    pub fn column_count_mismatch(expected: usize, actual: usize) -> Self {
        Self::ColumnCountMismatch { expected, actual }
    }
}

/// Result type for result-set operations.
pub type CoreResult<T> = Result<T, CoreError>;
