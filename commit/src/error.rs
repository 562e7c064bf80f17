//! Commit error types.

use editdata_core::RowId;
use editdata_edit::EditError;
use thiserror::Error;

use crate::connection::DriverError;

/// Why a commit stopped. Records ordered before `row_id` were applied.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The record could not be turned into a statement, or its result could
    /// not be applied to the result set.
    #[error("edit for row {row_id} failed: {source}")]
    Edit {
        row_id: RowId,
        #[source]
        source: EditError,
    },

    /// The connection rejected the statement.
    #[error("statement for row {row_id} failed to execute: {source}")]
    Execution {
        row_id: RowId,
        #[source]
        source: DriverError,
    },
}

impl CommitError {
    pub fn edit(row_id: RowId, source: EditError) -> Self {
        Self::Edit { row_id, source }
    }

    pub fn execution(row_id: RowId, source: DriverError) -> Self {
        Self::Execution { row_id, source }
    }

    /// The row whose record stopped the commit.
    pub fn row_id(&self) -> RowId {
        match self {
            CommitError::Edit { row_id, .. } | CommitError::Execution { row_id, .. } => *row_id,
        }
    }

    /// Whether the failure was caught before anything reached the database.
    pub fn is_validation(&self) -> bool {
        matches!(self, CommitError::Edit { source, .. } if source.is_validation())
    }
}

/// Result type for commit operations.
pub type CommitResult<T> = Result<T, CommitError>;
