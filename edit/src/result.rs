//! Views of pending edits and the outcome of applying them.

use editdata_core::{CellValue, Row, RowId};

/// Where a row stands relative to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRowState {
    /// No pending edit.
    Clean,
    DirtyInsert,
    DirtyUpdate,
    DirtyDelete,
}

/// One cell of an [`EditRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditCell {
    pub value: CellValue,
    /// The cell differs from what the database holds.
    pub is_dirty: bool,
}

impl EditCell {
    pub fn clean(value: CellValue) -> Self {
        Self {
            value,
            is_dirty: false,
        }
    }

    pub fn dirty(value: CellValue) -> Self {
        Self {
            value,
            is_dirty: true,
        }
    }
}

/// A row as the client sees it: stored values merged with pending changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRow {
    pub id: RowId,
    pub cells: Vec<EditCell>,
    pub state: EditRowState,
}

impl EditRow {
    /// A row with no pending edit.
    pub fn clean(row: &Row) -> Self {
        Self {
            id: row.id,
            cells: row.cells.iter().cloned().map(EditCell::clean).collect(),
            state: EditRowState::Clean,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state != EditRowState::Clean
    }
}

/// Result of setting or reverting a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCellResult {
    pub cell: EditCell,
    /// Whether the row still has any pending change.
    pub is_row_dirty: bool,
}

/// The change a committed record made to the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedChange {
    Inserted { row_id: RowId },
    Updated { row_id: RowId },
    Removed { row_id: RowId },
}

impl AppliedChange {
    pub fn row_id(&self) -> RowId {
        match self {
            AppliedChange::Inserted { row_id }
            | AppliedChange::Updated { row_id }
            | AppliedChange::Removed { row_id } => *row_id,
        }
    }
}
