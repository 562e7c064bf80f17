//! Handle to a running commit.

use tokio::task::JoinHandle;

use crate::error::{SessionError, SessionResult};

/// Returned by `commit_edits`. Dropping it does not cancel the commit.
#[derive(Debug)]
pub struct CommitHandle {
    task: JoinHandle<()>,
}

impl CommitHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Whether the commit, including its callback, has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the commit and its callback to finish.
    ///
    /// Success or failure of the commit itself is reported through the
    /// callbacks; this only fails if the task panicked or was cancelled.
    pub async fn wait(self) -> SessionResult<()> {
        self.task
            .await
            .map_err(|e| SessionError::commit_task(e.to_string()))
    }
}
