//! Pending DELETE of an existing row.

use editdata_core::{ResultSetCache, Row, RowId};
use std::sync::Arc;
use tracing::debug;

use crate::context::EditContext;
use crate::error::{EditError, EditResult};
use crate::result::{AppliedChange, EditCell, EditCellResult, EditRow, EditRowState};
use crate::sql::{build_where_clause, table_hint};
use crate::statement::{EditStatement, ExecutionOutcome};

#[derive(Debug, Clone)]
pub struct RowDelete {
    context: Arc<EditContext>,
    original: Row,
}

impl RowDelete {
    pub fn new(context: Arc<EditContext>, original: Row) -> Self {
        Self { context, original }
    }

    pub fn row_id(&self) -> RowId {
        self.original.id
    }

    /// A row marked for deletion cannot be edited.
    pub fn set_cell(&self, _ordinal: usize, _text: &str) -> EditResult<EditCellResult> {
        Err(EditError::RowMarkedForDeletion {
            row_id: self.row_id(),
        })
    }

    pub fn revert_cell(&self, _ordinal: usize) -> EditResult<EditCellResult> {
        Err(EditError::RowMarkedForDeletion {
            row_id: self.row_id(),
        })
    }

    pub fn edit_row(&self) -> EditRow {
        EditRow {
            id: self.row_id(),
            cells: self.original.cells.iter().cloned().map(EditCell::clean).collect(),
            state: EditRowState::DirtyDelete,
        }
    }

    fn statement_head(&self) -> String {
        let table = &self.context.table;
        format!(
            "DELETE FROM {}{}",
            table.escaped_multipart_name(),
            table_hint(table)
        )
    }

    pub fn build_command(&self) -> EditResult<EditStatement> {
        let clause = build_where_clause(&self.context.table, &self.original, true)?;
        let sql = format!("{} WHERE {}", self.statement_head(), clause.text);
        Ok(EditStatement::new(sql, clause.parameters))
    }

    pub fn build_script(&self) -> EditResult<String> {
        let clause = build_where_clause(&self.context.table, &self.original, false)?;
        Ok(format!("{} WHERE {}", self.statement_head(), clause.text))
    }

    /// Tombstone the row in the result set.
    pub fn apply_result(
        &self,
        cache: &mut dyn ResultSetCache,
        outcome: &ExecutionOutcome,
    ) -> EditResult<AppliedChange> {
        cache.remove_row(self.row_id())?;
        debug!(
            row_id = %self.row_id(),
            rows_affected = outcome.rows_affected,
            "Deleted row applied"
        );
        Ok(AppliedChange::Removed {
            row_id: self.row_id(),
        })
    }
}
