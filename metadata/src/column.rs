//! Column metadata.

use editdata_core::SqlType;

use crate::identifier::escape_identifier;

/// Everything the edit engine needs to know about one table column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: String,
    /// Bracket-escaped name for use in generated SQL.
    pub escaped_name: String,
    /// Zero-based position, assigned by [`TableMetadataBuilder`](crate::TableMetadataBuilder).
    pub ordinal: usize,
    /// Declared type.
    pub sql_type: SqlType,
    /// Whether the column allows NULL.
    pub nullable: bool,
    /// Part of a primary or unique key.
    pub is_key: bool,
    /// Whether the column may appear in INSERT and UPDATE statements.
    pub is_updatable: bool,
    /// Computed by the server.
    pub is_calculated: bool,
    /// Usable to identify a row when the table declares no key.
    pub is_trustworthy_for_uniqueness: bool,
    /// Default expression text, if the column has one.
    pub default_value: Option<String>,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, declared_type: &str) -> Self {
        let name = name.into();
        Self {
            escaped_name: escape_identifier(&name),
            name,
            ordinal: 0,
            sql_type: SqlType::parse(declared_type),
            nullable: false,
            is_key: false,
            is_updatable: true,
            is_calculated: false,
            is_trustworthy_for_uniqueness: false,
            default_value: None,
        }
    }

    pub fn key(mut self) -> Self {
        self.is_key = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Identity and rowversion-style columns: readable, never written.
    pub fn read_only(mut self) -> Self {
        self.is_updatable = false;
        self
    }

    /// A computed column. Implies read-only.
    pub fn calculated(mut self) -> Self {
        self.is_calculated = true;
        self.is_updatable = false;
        self
    }

    pub fn trustworthy(mut self) -> Self {
        self.is_trustworthy_for_uniqueness = true;
        self
    }

    pub fn with_default(mut self, expression: impl Into<String>) -> Self {
        self.default_value = Some(expression.into());
        self
    }

    /// The default the server applies when an INSERT omits this column.
    /// Nullable columns without an explicit default fall back to NULL.
    pub fn effective_default(&self) -> Option<&str> {
        match &self.default_value {
            Some(default) => Some(default.as_str()),
            None if self.nullable => Some("NULL"),
            None => None,
        }
    }

    /// Whether the server can supply a value when an INSERT omits this column.
    pub fn has_default(&self) -> bool {
        self.effective_default().is_some()
    }
}
