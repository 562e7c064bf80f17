//! The database connection a commit executes against.

use async_trait::async_trait;
use editdata_edit::{EditStatement, ExecutionOutcome};
use thiserror::Error;

/// Failure reported by the driver for one statement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A live connection able to execute edit statements.
///
/// Retries, if any, are the implementation's business; a returned error ends
/// the commit.
#[async_trait]
pub trait EditConnection: Send + Sync {
    /// Execute one statement. Statements with
    /// [`captures_output`](EditStatement::captures_output) set return the
    /// inserted row in [`ExecutionOutcome::captured_row`].
    async fn execute(&self, statement: &EditStatement) -> Result<ExecutionOutcome, DriverError>;
}
