//! Per-session context shared by every pending edit.

use editdata_metadata::TableMetadata;

/// Knobs that change how edits are coerced, displayed and executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Executed INSERTs return every column of the new row.
    pub capture_inserted_values: bool,
    /// Cell text that means SQL NULL.
    pub null_text: String,
    /// Display text for calculated columns of a row not yet inserted.
    pub computed_placeholder: String,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            capture_inserted_values: true,
            null_text: "NULL".to_string(),
            computed_placeholder: "<computed>".to_string(),
        }
    }
}

/// Table metadata plus options. Held behind an `Arc` by each edit record.
#[derive(Debug, Clone)]
pub struct EditContext {
    pub table: TableMetadata,
    pub options: EditOptions,
}

impl EditContext {
    pub fn new(table: TableMetadata, options: EditOptions) -> Self {
        Self { table, options }
    }
}
