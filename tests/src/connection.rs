//! A scripted stand-in for a database connection.

use async_trait::async_trait;
use editdata_commit::{DriverError, EditConnection};
use editdata_core::Value;
use editdata_edit::{EditStatement, ExecutionOutcome};
use parking_lot::Mutex;
use std::collections::VecDeque;

type Predicate = Box<dyn Fn(&EditStatement) -> bool + Send + Sync>;

/// Records every statement it is asked to execute.
///
/// Fails statements matching a predicate, and answers capturing INSERTs with
/// queued rows (or no captured row once the queue is empty).
#[derive(Default)]
pub struct ScriptedConnection {
    executed: Mutex<Vec<EditStatement>>,
    captured_rows: Mutex<VecDeque<Vec<Value>>>,
    fail_when: Option<Predicate>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every statement for which `predicate` holds.
    pub fn fail_when(
        mut self,
        predicate: impl Fn(&EditStatement) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.fail_when = Some(Box::new(predicate));
        self
    }

    /// Queue a row for the next capturing INSERT to return.
    pub fn returning_row(self, row: Vec<Value>) -> Self {
        self.captured_rows.lock().push_back(row);
        self
    }

    /// Every statement executed so far, failed ones included.
    pub fn executed(&self) -> Vec<EditStatement> {
        self.executed.lock().clone()
    }

    /// SQL text of every statement executed so far.
    pub fn executed_sql(&self) -> Vec<String> {
        self.executed.lock().iter().map(|s| s.sql.clone()).collect()
    }
}

#[async_trait]
impl EditConnection for ScriptedConnection {
    async fn execute(&self, statement: &EditStatement) -> Result<ExecutionOutcome, DriverError> {
        self.executed.lock().push(statement.clone());

        if self.fail_when.as_ref().is_some_and(|fails| fails(statement)) {
            return Err(DriverError::new(format!("rejected: {}", statement.sql)));
        }

        let outcome = ExecutionOutcome::affected(1);
        if !statement.captures_output {
            return Ok(outcome);
        }
        Ok(match self.captured_rows.lock().pop_front() {
            Some(row) => outcome.with_captured_row(row),
            None => outcome,
        })
    }
}
