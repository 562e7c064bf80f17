//! Pending INSERT of a row that does not exist yet.

use editdata_core::{CellValue, ResultSetCache, RowId, Value};
use editdata_metadata::ColumnMetadata;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{column_at, writable_column};
use crate::cell::CellUpdate;
use crate::context::EditContext;
use crate::error::{EditError, EditResult};
use crate::result::{AppliedChange, EditCell, EditCellResult, EditRow, EditRowState};
use crate::sql::{format_literal, value_parameter_name};
use crate::statement::{EditStatement, ExecutionOutcome, Parameter};

/// A new row. Columns the client never sets fall back to their defaults.
#[derive(Debug, Clone)]
pub struct RowCreate {
    row_id: RowId,
    context: Arc<EditContext>,
    overrides: BTreeMap<usize, CellUpdate>,
}

impl RowCreate {
    pub fn new(row_id: RowId, context: Arc<EditContext>) -> Self {
        Self {
            row_id,
            context,
            overrides: BTreeMap::new(),
        }
    }

    pub fn row_id(&self) -> RowId {
        self.row_id
    }

    /// Display text of each column's default, `None` where there is none.
    pub fn default_values(&self) -> Vec<Option<String>> {
        self.context
            .table
            .columns()
            .iter()
            .map(|column| self.default_display(column))
            .collect()
    }

    fn default_display(&self, column: &ColumnMetadata) -> Option<String> {
        if column.is_calculated {
            return Some(self.context.options.computed_placeholder.clone());
        }
        column.effective_default().map(|default| {
            if default == "NULL" {
                self.context.options.null_text.clone()
            } else {
                strip_parentheses(default).to_string()
            }
        })
    }

    fn default_cell(&self, column: &ColumnMetadata) -> CellValue {
        let display = self.default_display(column).unwrap_or_default();
        CellValue::with_display(Value::Null, display)
    }

    pub fn set_cell(&mut self, ordinal: usize, text: &str) -> EditResult<EditCellResult> {
        let column = writable_column(&self.context.table, ordinal)?;
        let update = CellUpdate::new(column, text, &self.context.options.null_text)?;
        let cell = EditCell::dirty(update.to_cell_value());
        self.overrides.insert(ordinal, update);

        Ok(EditCellResult {
            cell,
            is_row_dirty: true,
        })
    }

    /// Forget the client's value so the column's default applies again.
    pub fn revert_cell(&mut self, ordinal: usize) -> EditResult<EditCellResult> {
        let column = column_at(&self.context.table, ordinal)?;
        self.overrides.remove(&ordinal);

        Ok(EditCellResult {
            cell: EditCell::clean(self.default_cell(column)),
            is_row_dirty: true,
        })
    }

    pub fn edit_row(&self) -> EditRow {
        let cells = self
            .context
            .table
            .columns()
            .iter()
            .map(|column| match self.overrides.get(&column.ordinal) {
                Some(update) => EditCell::dirty(update.to_cell_value()),
                None => EditCell::clean(self.default_cell(column)),
            })
            .collect();

        EditRow {
            id: self.row_id,
            cells,
            state: EditRowState::DirtyInsert,
        }
    }

    /// Columns the INSERT names, with their values.
    ///
    /// Read-only columns are never named. A writable column without a value
    /// is left to its default; without a default it is an error.
    fn insert_values(&self) -> EditResult<Vec<(&ColumnMetadata, &Value)>> {
        let mut values = Vec::new();
        for column in self.context.table.columns() {
            if !column.is_updatable {
                continue;
            }
            match self.overrides.get(&column.ordinal) {
                Some(update) => values.push((column, update.value())),
                None if column.has_default() => {}
                None => return Err(EditError::missing_value(&column.name)),
            }
        }
        Ok(values)
    }

    fn column_list(values: &[(&ColumnMetadata, &Value)]) -> String {
        if values.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = values.iter().map(|(c, _)| c.escaped_name.as_str()).collect();
        format!("({})", names.join(", "))
    }

    pub fn build_command(&self) -> EditResult<EditStatement> {
        let values = self.insert_values()?;
        let table = &self.context.table;

        let mut sql = format!(
            "INSERT INTO {}{}",
            table.escaped_multipart_name(),
            Self::column_list(&values)
        );

        let capture = self.context.options.capture_inserted_values;
        if capture {
            let outputs: Vec<String> = table
                .columns()
                .iter()
                .map(|c| format!("inserted.{}", c.escaped_name))
                .collect();
            sql.push_str(" OUTPUT ");
            sql.push_str(&outputs.join(", "));
        }

        let mut parameters = Vec::with_capacity(values.len());
        if values.is_empty() {
            sql.push_str(" DEFAULT VALUES");
        } else {
            let names: Vec<String> = values
                .iter()
                .map(|(column, value)| {
                    let name = value_parameter_name(self.row_id, column.ordinal);
                    parameters.push(Parameter::new(
                        name.clone(),
                        (*value).clone(),
                        column.sql_type.clone(),
                    ));
                    name
                })
                .collect();
            sql.push_str(&format!(" VALUES ({})", names.join(", ")));
        }

        let statement = EditStatement::new(sql, parameters);
        Ok(if capture {
            statement.capturing_output()
        } else {
            statement
        })
    }

    pub fn build_script(&self) -> EditResult<String> {
        let values = self.insert_values()?;
        let table = &self.context.table;

        if values.is_empty() {
            return Ok(format!(
                "INSERT INTO {} DEFAULT VALUES",
                table.escaped_multipart_name()
            ));
        }

        let literals: Vec<String> = values.iter().map(|(_, v)| format_literal(v)).collect();
        Ok(format!(
            "INSERT INTO {}{} VALUES ({})",
            table.escaped_multipart_name(),
            Self::column_list(&values),
            literals.join(", ")
        ))
    }

    /// Store the inserted row in the result set under this record's id.
    ///
    /// Server-captured values win; otherwise the row holds what the client
    /// supplied and NULL elsewhere.
    pub fn apply_result(
        &self,
        cache: &mut dyn ResultSetCache,
        outcome: &ExecutionOutcome,
    ) -> EditResult<AppliedChange> {
        let column_count = self.context.table.column_count();
        let cells = match &outcome.captured_row {
            Some(values) if values.len() == column_count => {
                values.iter().cloned().map(CellValue::new).collect()
            }
            captured => {
                if let Some(values) = captured {
                    warn!(
                        row_id = %self.row_id,
                        expected = column_count,
                        actual = values.len(),
                        "Captured row width does not match table, using supplied values"
                    );
                }
                (0..column_count)
                    .map(|ordinal| {
                        self.overrides
                            .get(&ordinal)
                            .map(CellUpdate::to_cell_value)
                            .unwrap_or_else(CellValue::null)
                    })
                    .collect()
            }
        };

        cache.insert_row(self.row_id, cells)?;
        debug!(row_id = %self.row_id, "Inserted row applied");
        Ok(AppliedChange::Inserted { row_id: self.row_id })
    }
}

/// `((0))` -> `0`, the way catalog default expressions are shown.
fn strip_parentheses(expression: &str) -> &str {
    let mut text = expression.trim();
    while let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        if !is_balanced(inner) {
            break;
        }
        text = inner.trim();
    }
    text
}

fn is_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
