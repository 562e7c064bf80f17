//! Metadata discovery contract.

use std::fmt;

use crate::error::MetadataResult;
use crate::identifier::escape_multipart;
use crate::table::TableMetadata;

/// Kind of object an edit session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    #[default]
    Table,
    View,
}

/// Reference to the object whose rows are being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
    pub kind: ObjectKind,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            kind: ObjectKind::Table,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn view(mut self) -> Self {
        self.kind = ObjectKind::View;
        self
    }

    /// Escaped `[schema].[name]`, or `[name]` without a schema.
    pub fn escaped_multipart_name(&self) -> String {
        match &self.schema {
            Some(schema) => escape_multipart(&[schema.as_str(), self.name.as_str()]),
            None => escape_multipart(&[self.name.as_str()]),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.escaped_multipart_name())
    }
}

/// Supplies table metadata, typically by inspecting the live schema.
pub trait TableMetadataProvider {
    /// Describe the table or view named by `table`.
    fn table_metadata(&self, table: &TableRef) -> MetadataResult<TableMetadata>;
}
