//! The pending change to one row.

use editdata_core::{ResultSetCache, RowId};

use crate::error::EditResult;
use crate::ops::{RowCreate, RowDelete, RowUpdate};
use crate::result::{AppliedChange, EditCellResult, EditRow};
use crate::statement::{EditStatement, ExecutionOutcome};

/// Kind of pending change. Orders records within a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditKind {
    Create,
    Update,
    Delete,
}

/// A pending change to exactly one row.
#[derive(Debug, Clone)]
pub enum EditRecord {
    Create(RowCreate),
    Update(RowUpdate),
    Delete(RowDelete),
}

impl EditRecord {
    pub fn row_id(&self) -> RowId {
        match self {
            EditRecord::Create(op) => op.row_id(),
            EditRecord::Update(op) => op.row_id(),
            EditRecord::Delete(op) => op.row_id(),
        }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditRecord::Create(_) => EditKind::Create,
            EditRecord::Update(_) => EditKind::Update,
            EditRecord::Delete(_) => EditKind::Delete,
        }
    }

    /// Parameterized statement for execution.
    pub fn build_command(&self) -> EditResult<EditStatement> {
        match self {
            EditRecord::Create(op) => op.build_command(),
            EditRecord::Update(op) => op.build_command(),
            EditRecord::Delete(op) => op.build_command(),
        }
    }

    /// Literal statement text for script export.
    pub fn build_script(&self) -> EditResult<String> {
        match self {
            EditRecord::Create(op) => op.build_script(),
            EditRecord::Update(op) => op.build_script(),
            EditRecord::Delete(op) => op.build_script(),
        }
    }

    /// Reflect a successfully executed statement in the result set.
    pub fn apply_result(
        &self,
        cache: &mut dyn ResultSetCache,
        outcome: &ExecutionOutcome,
    ) -> EditResult<AppliedChange> {
        match self {
            EditRecord::Create(op) => op.apply_result(cache, outcome),
            EditRecord::Update(op) => op.apply_result(cache, outcome),
            EditRecord::Delete(op) => op.apply_result(cache, outcome),
        }
    }

    pub fn edit_row(&self) -> EditRow {
        match self {
            EditRecord::Create(op) => op.edit_row(),
            EditRecord::Update(op) => op.edit_row(),
            EditRecord::Delete(op) => op.edit_row(),
        }
    }

    pub fn set_cell(&mut self, ordinal: usize, text: &str) -> EditResult<EditCellResult> {
        match self {
            EditRecord::Create(op) => op.set_cell(ordinal, text),
            EditRecord::Update(op) => op.set_cell(ordinal, text),
            EditRecord::Delete(op) => op.set_cell(ordinal, text),
        }
    }

    pub fn revert_cell(&mut self, ordinal: usize) -> EditResult<EditCellResult> {
        match self {
            EditRecord::Create(op) => op.revert_cell(ordinal),
            EditRecord::Update(op) => op.revert_cell(ordinal),
            EditRecord::Delete(op) => op.revert_cell(ordinal),
        }
    }

    /// An Update whose every column matches the stored row again.
    pub fn is_redundant(&self) -> bool {
        matches!(self, EditRecord::Update(op) if !op.has_changes())
    }
}

impl From<RowCreate> for EditRecord {
    fn from(op: RowCreate) -> Self {
        EditRecord::Create(op)
    }
}

impl From<RowUpdate> for EditRecord {
    fn from(op: RowUpdate) -> Self {
        EditRecord::Update(op)
    }
}

impl From<RowDelete> for EditRecord {
    fn from(op: RowDelete) -> Self {
        EditRecord::Delete(op)
    }
}
