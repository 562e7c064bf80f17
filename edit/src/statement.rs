//! Statements handed to a connection and what comes back.

use editdata_core::{SqlType, Value};

/// A named statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Name including the leading `@`.
    pub name: String,
    pub value: Value,
    /// Declared type of the column the value is bound to.
    pub sql_type: SqlType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: Value, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            value,
            sql_type,
        }
    }
}

/// A parameterized statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct EditStatement {
    pub sql: String,
    pub parameters: Vec<Parameter>,
    /// The statement returns the inserted row as a single result row.
    pub captures_output: bool,
}

impl EditStatement {
    pub fn new(sql: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
            captures_output: false,
        }
    }

    pub fn capturing_output(mut self) -> Self {
        self.captures_output = true;
        self
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// What a connection reports after executing an [`EditStatement`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionOutcome {
    pub rows_affected: u64,
    /// Every column of the inserted row, when the statement captured output.
    pub captured_row: Option<Vec<Value>>,
}

impl ExecutionOutcome {
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            captured_row: None,
        }
    }

    pub fn with_captured_row(mut self, row: Vec<Value>) -> Self {
        self.captured_row = Some(row);
        self
    }
}
