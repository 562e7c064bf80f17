//! Table metadata and its builder.

use editdata_core::ResultColumn;
use std::collections::HashSet;

use crate::column::ColumnMetadata;
use crate::error::{MetadataError, MetadataResult};
use crate::identifier::escape_multipart;

/// Identity of the table an edit session writes to.
///
/// Immutable after construction; shared by every pending edit of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    /// Escaped multipart name, e.g. `[dbo].[Orders]`.
    escaped_multipart_name: String,
    /// Memory-optimized tables need an isolation hint on UPDATE and DELETE.
    is_memory_optimized: bool,
    /// Columns in ordinal order.
    columns: Vec<ColumnMetadata>,
    /// Ordinals of the columns used to identify a row.
    key_ordinals: Vec<usize>,
}

impl TableMetadata {
    /// Escaped multipart table name.
    pub fn escaped_multipart_name(&self) -> &str {
        &self.escaped_multipart_name
    }

    /// Whether the table is memory-optimized.
    pub fn is_memory_optimized(&self) -> bool {
        self.is_memory_optimized
    }

    /// All columns in ordinal order.
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Get a column by ordinal.
    pub fn column(&self, ordinal: usize) -> Option<&ColumnMetadata> {
        self.columns.get(ordinal)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns that identify a row: the declared key columns, or every column
    /// trustworthy for uniqueness when no key is declared. May be empty; callers
    /// that build WHERE clauses must check.
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.key_ordinals.iter().filter_map(|&ordinal| self.columns.get(ordinal))
    }

    /// Whether any column can identify a row.
    pub fn has_key_columns(&self) -> bool {
        !self.key_ordinals.is_empty()
    }

    /// Reconcile with the columns a query actually returned.
    ///
    /// The result must have the same columns in the same order. Declared types
    /// and nullability are taken from the result set; key, updatability and
    /// default information stay as discovered.
    pub fn extend_with_result_columns(mut self, result_columns: &[ResultColumn]) -> MetadataResult<Self> {
        if result_columns.len() != self.columns.len() {
            return Err(MetadataError::column_count_mismatch(
                &self.escaped_multipart_name,
                self.columns.len(),
                result_columns.len(),
            ));
        }

        for (column, result_column) in self.columns.iter_mut().zip(result_columns) {
            if !column.name.eq_ignore_ascii_case(&result_column.name) {
                return Err(MetadataError::column_name_mismatch(
                    column.ordinal,
                    &column.name,
                    &result_column.name,
                ));
            }
            column.sql_type = result_column.sql_type.clone();
            column.nullable = result_column.nullable;
        }

        Ok(self)
    }
}

/// Builder for constructing an immutable [`TableMetadata`].
#[derive(Debug, Default)]
pub struct TableMetadataBuilder {
    escaped_multipart_name: String,
    is_memory_optimized: bool,
    columns: Vec<ColumnMetadata>,
}

impl TableMetadataBuilder {
    /// Start a builder for the table named by `parts` (e.g. `["dbo", "Orders"]`).
    pub fn new<S: AsRef<str>>(parts: &[S]) -> Self {
        Self {
            escaped_multipart_name: escape_multipart(parts),
            ..Default::default()
        }
    }

    /// Start a builder from an already-escaped multipart name.
    pub fn escaped(escaped_multipart_name: impl Into<String>) -> Self {
        Self {
            escaped_multipart_name: escaped_multipart_name.into(),
            ..Default::default()
        }
    }

    /// Mark the table memory-optimized.
    pub fn memory_optimized(mut self) -> Self {
        self.is_memory_optimized = true;
        self
    }

    /// Append a column. Ordinals follow insertion order.
    pub fn column(mut self, column: ColumnMetadata) -> Self {
        self.columns.push(column);
        self
    }

    /// Build the immutable metadata.
    pub fn build(self) -> MetadataResult<TableMetadata> {
        if self.columns.is_empty() {
            return Err(MetadataError::no_columns(self.escaped_multipart_name));
        }

        let mut seen = HashSet::new();
        let mut columns = self.columns;
        for (ordinal, column) in columns.iter_mut().enumerate() {
            if !seen.insert(column.name.to_ascii_lowercase()) {
                return Err(MetadataError::duplicate_column(
                    &self.escaped_multipart_name,
                    &column.name,
                ));
            }
            column.ordinal = ordinal;
        }

        let declared: Vec<usize> = columns
            .iter()
            .filter(|c| c.is_key)
            .map(|c| c.ordinal)
            .collect();
        let key_ordinals = if declared.is_empty() {
            columns
                .iter()
                .filter(|c| c.is_trustworthy_for_uniqueness)
                .map(|c| c.ordinal)
                .collect()
        } else {
            declared
        };

        Ok(TableMetadata {
            escaped_multipart_name: self.escaped_multipart_name,
            is_memory_optimized: self.is_memory_optimized,
            columns,
            key_ordinals,
        })
    }
}
