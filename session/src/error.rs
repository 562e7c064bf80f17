//! Session error types.

use editdata_commit::CommitError;
use editdata_core::RowId;
use editdata_edit::EditError;
use editdata_metadata::MetadataError;
use thiserror::Error;

/// Broad classes of session failure, as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid input to a session method.
    Argument,
    /// Row id or column ordinal outside valid bounds.
    OutOfRange,
    /// Duplicate pending edit, or a commit already in flight.
    IllegalState,
    /// Missing key columns, missing value, column not updatable.
    Validation,
    /// The database rejected a statement.
    Execution,
    /// The query has not finished executing.
    NotExecuted,
    /// The query did not produce exactly one result set.
    InvalidResultSetCount,
    /// Writing an exported script failed.
    Io,
}

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid argument.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// Row id outside the addressable rows.
    #[error("row id {row_id} is out of range")]
    RowOutOfRange { row_id: i64 },

    /// The row has no pending edit to revert.
    #[error("row {row_id} has no pending edit")]
    NoPendingEdit { row_id: RowId },

    /// The row already has a pending edit.
    #[error("row {row_id} already has a pending edit; revert it first")]
    EditExists { row_id: RowId },

    /// A commit is already running for this session.
    #[error("a commit is already in progress")]
    CommitInProgress,

    /// Commits are spawned on the ambient tokio runtime.
    #[error("no async runtime is available to run the commit")]
    NoRuntime,

    /// The commit task ended without completing.
    #[error("commit task failed: {message}")]
    CommitTask { message: String },

    /// The query has not finished executing.
    #[error("query has not finished executing")]
    QueryNotExecuted,

    /// Edit sessions need exactly one result set.
    #[error("query produced {count} result sets, expected exactly one")]
    InvalidResultSetCount { count: usize },

    /// Edit error.
    #[error("edit error: {0}")]
    Edit(#[from] EditError),

    /// Commit error.
    #[error("commit error: {0}")]
    Commit(#[from] CommitError),

    /// Metadata error.
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn commit_task(message: impl Into<String>) -> Self {
        Self::CommitTask {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidArgument { .. } => ErrorKind::Argument,
            SessionError::RowOutOfRange { .. } | SessionError::NoPendingEdit { .. } => {
                ErrorKind::OutOfRange
            }
            SessionError::EditExists { .. }
            | SessionError::CommitInProgress
            | SessionError::NoRuntime => ErrorKind::IllegalState,
            SessionError::CommitTask { .. } => ErrorKind::Execution,
            SessionError::QueryNotExecuted => ErrorKind::NotExecuted,
            SessionError::InvalidResultSetCount { .. } => ErrorKind::InvalidResultSetCount,
            SessionError::Edit(e) => edit_kind(e),
            SessionError::Commit(CommitError::Edit { source, .. }) => match source {
                EditError::ResultSet(_) => ErrorKind::Execution,
                other => edit_kind(other),
            },
            SessionError::Commit(CommitError::Execution { .. }) => ErrorKind::Execution,
            SessionError::Metadata(_) => ErrorKind::Validation,
            SessionError::Io(_) => ErrorKind::Io,
        }
    }
}

fn edit_kind(error: &EditError) -> ErrorKind {
    match error {
        EditError::ColumnIndexOutOfRange { .. } => ErrorKind::OutOfRange,
        EditError::InvalidCellValue { .. } => ErrorKind::Argument,
        EditError::ResultSet(_) => ErrorKind::IllegalState,
        EditError::ColumnNotUpdatable { .. }
        | EditError::MissingValue { .. }
        | EditError::NoKeyColumns { .. }
        | EditError::NoChanges { .. }
        | EditError::RowMarkedForDeletion { .. } => ErrorKind::Validation,
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
