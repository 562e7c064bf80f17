//! Pending UPDATE of an existing row.

use editdata_core::{CellValue, ResultSetCache, Row, RowId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::{column_at, writable_column};
use crate::cell::CellUpdate;
use crate::context::EditContext;
use crate::error::{EditError, EditResult};
use crate::result::{AppliedChange, EditCell, EditCellResult, EditRow, EditRowState};
use crate::sql::{build_where_clause, format_literal, table_hint, value_parameter_name};
use crate::statement::{EditStatement, ExecutionOutcome, Parameter};

/// Changed columns of a stored row, plus a snapshot of the row as loaded.
#[derive(Debug, Clone)]
pub struct RowUpdate {
    context: Arc<EditContext>,
    original: Row,
    overrides: BTreeMap<usize, CellUpdate>,
}

impl RowUpdate {
    pub fn new(context: Arc<EditContext>, original: Row) -> Self {
        Self {
            context,
            original,
            overrides: BTreeMap::new(),
        }
    }

    pub fn row_id(&self) -> RowId {
        self.original.id
    }

    /// Whether any column differs from the snapshot.
    pub fn has_changes(&self) -> bool {
        !self.overrides.is_empty()
    }

    fn original_cell(&self, ordinal: usize) -> CellValue {
        self.original.cell(ordinal).cloned().unwrap_or_else(CellValue::null)
    }

    /// Set a column. Setting it back to the stored value drops the change.
    pub fn set_cell(&mut self, ordinal: usize, text: &str) -> EditResult<EditCellResult> {
        let column = writable_column(&self.context.table, ordinal)?;
        let update = CellUpdate::new(column, text, &self.context.options.null_text)?;

        let cell = if self.original.cell(ordinal).map(|c| &c.raw) == Some(update.value()) {
            self.overrides.remove(&ordinal);
            EditCell::clean(self.original_cell(ordinal))
        } else {
            let cell = EditCell::dirty(update.to_cell_value());
            self.overrides.insert(ordinal, update);
            cell
        };

        Ok(EditCellResult {
            cell,
            is_row_dirty: self.has_changes(),
        })
    }

    pub fn revert_cell(&mut self, ordinal: usize) -> EditResult<EditCellResult> {
        column_at(&self.context.table, ordinal)?;
        self.overrides.remove(&ordinal);

        Ok(EditCellResult {
            cell: EditCell::clean(self.original_cell(ordinal)),
            is_row_dirty: self.has_changes(),
        })
    }

    fn merged_cells(&self) -> Vec<CellValue> {
        (0..self.context.table.column_count())
            .map(|ordinal| match self.overrides.get(&ordinal) {
                Some(update) => update.to_cell_value(),
                None => self.original_cell(ordinal),
            })
            .collect()
    }

    pub fn edit_row(&self) -> EditRow {
        let cells = (0..self.context.table.column_count())
            .map(|ordinal| match self.overrides.get(&ordinal) {
                Some(update) => EditCell::dirty(update.to_cell_value()),
                None => EditCell::clean(self.original_cell(ordinal)),
            })
            .collect();

        EditRow {
            id: self.row_id(),
            cells,
            state: EditRowState::DirtyUpdate,
        }
    }

    fn check_changes(&self) -> EditResult<()> {
        if self.overrides.is_empty() {
            return Err(EditError::NoChanges {
                row_id: self.row_id(),
            });
        }
        Ok(())
    }

    fn target(&self) -> String {
        let table = &self.context.table;
        format!("{}{}", table.escaped_multipart_name(), table_hint(table))
    }

    pub fn build_command(&self) -> EditResult<EditStatement> {
        self.check_changes()?;
        let table = &self.context.table;
        let clause = build_where_clause(table, &self.original, true)?;

        let mut parameters = Vec::with_capacity(self.overrides.len() + clause.parameters.len());
        let mut assignments = Vec::with_capacity(self.overrides.len());
        for (&ordinal, update) in &self.overrides {
            let column = column_at(table, ordinal)?;
            let name = value_parameter_name(self.row_id(), ordinal);
            assignments.push(format!("{} = {}", column.escaped_name, name));
            parameters.push(Parameter::new(
                name,
                update.value().clone(),
                column.sql_type.clone(),
            ));
        }
        parameters.extend(clause.parameters);

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.target(),
            assignments.join(", "),
            clause.text
        );
        Ok(EditStatement::new(sql, parameters))
    }

    pub fn build_script(&self) -> EditResult<String> {
        self.check_changes()?;
        let table = &self.context.table;
        let clause = build_where_clause(table, &self.original, false)?;

        let mut assignments = Vec::with_capacity(self.overrides.len());
        for (&ordinal, update) in &self.overrides {
            let column = column_at(table, ordinal)?;
            assignments.push(format!(
                "{} = {}",
                column.escaped_name,
                format_literal(update.value())
            ));
        }

        Ok(format!(
            "UPDATE {} SET {} WHERE {}",
            self.target(),
            assignments.join(", "),
            clause.text
        ))
    }

    /// Write the new values into the stored row.
    pub fn apply_result(
        &self,
        cache: &mut dyn ResultSetCache,
        outcome: &ExecutionOutcome,
    ) -> EditResult<AppliedChange> {
        cache.update_row(self.row_id(), self.merged_cells())?;
        debug!(
            row_id = %self.row_id(),
            columns = self.overrides.len(),
            rows_affected = outcome.rows_affected,
            "Updated row applied"
        );
        Ok(AppliedChange::Updated {
            row_id: self.row_id(),
        })
    }
}
