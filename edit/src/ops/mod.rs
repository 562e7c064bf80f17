//! Record variant implementations.
//!
//! Each pending change (INSERT, UPDATE, DELETE) lives in its own module;
//! [`EditRecord`](crate::EditRecord) dispatches to them.

mod create;
mod delete;
mod update;

pub use create::RowCreate;
pub use delete::RowDelete;
pub use update::RowUpdate;

use editdata_metadata::{ColumnMetadata, TableMetadata};

use crate::error::{EditError, EditResult};

/// Look up a column by ordinal.
fn column_at(table: &TableMetadata, ordinal: usize) -> EditResult<&ColumnMetadata> {
    table
        .column(ordinal)
        .ok_or_else(|| EditError::column_index_out_of_range(ordinal, table.column_count()))
}

/// Look up a column the client is allowed to write.
fn writable_column(table: &TableMetadata, ordinal: usize) -> EditResult<&ColumnMetadata> {
    let column = column_at(table, ordinal)?;
    if !column.is_updatable {
        return Err(EditError::column_not_updatable(&column.name));
    }
    Ok(column)
}
