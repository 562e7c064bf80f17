//! SQL text generation shared by the record variants.

use editdata_core::{hex_literal, Row, RowId, Value};
use editdata_metadata::TableMetadata;

use crate::error::{EditError, EditResult};
use crate::statement::Parameter;

/// Quote text as a unicode string literal, doubling embedded quotes.
pub fn quote_unicode(text: &str) -> String {
    format!("N'{}'", text.replace('\'', "''"))
}

/// Render a value as a T-SQL literal for script export.
pub fn format_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Decimal(d) => d.clone(),
        Value::Bytes(bytes) => hex_literal(bytes),
        Value::String(s) => quote_unicode(s),
        Value::Date(_) | Value::DateTime(_) | Value::Time(_) | Value::Uuid(_) => {
            quote_unicode(&value.to_string())
        }
    }
}

/// Name of a SET or VALUES parameter.
pub fn value_parameter_name(row_id: RowId, ordinal: usize) -> String {
    format!("@Value{}_{}", row_id, ordinal)
}

/// Name of a WHERE-clause parameter.
pub fn where_parameter_name(row_id: RowId, ordinal: usize) -> String {
    format!("@Param{}_{}", row_id, ordinal)
}

/// A WHERE clause (without the `WHERE` keyword) plus the parameters it binds.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub text: String,
    pub parameters: Vec<Parameter>,
}

/// Build the key-column predicate identifying `original` in `table`.
///
/// A NULL key value compares with `IS NULL`. Large-object keys cannot be
/// compared with `=` and only assert `IS NOT NULL`, which can match more than
/// one row. With `parameterize` off, values are inlined as literals.
pub fn build_where_clause(
    table: &TableMetadata,
    original: &Row,
    parameterize: bool,
) -> EditResult<WhereClause> {
    if !table.has_key_columns() {
        return Err(EditError::no_key_columns(table.escaped_multipart_name()));
    }

    let mut parts = Vec::new();
    let mut parameters = Vec::new();
    for column in table.key_columns() {
        let value = original
            .cell(column.ordinal)
            .map(|cell| &cell.raw)
            .unwrap_or(&Value::Null);

        if value.is_null() {
            parts.push(format!("{} IS NULL", column.escaped_name));
        } else if column.sql_type.is_large_object() {
            parts.push(format!("{} IS NOT NULL", column.escaped_name));
        } else if parameterize {
            let name = where_parameter_name(original.id, column.ordinal);
            parts.push(format!("{} = {}", column.escaped_name, name));
            parameters.push(Parameter::new(name, value.clone(), column.sql_type.clone()));
        } else {
            parts.push(format!("{} = {}", column.escaped_name, format_literal(value)));
        }
    }

    Ok(WhereClause {
        text: parts.join(" AND "),
        parameters,
    })
}

/// Table hint required by UPDATE and DELETE on memory-optimized tables.
pub(crate) fn table_hint(table: &TableMetadata) -> &'static str {
    if table.is_memory_optimized() {
        " WITH (SNAPSHOT)"
    } else {
        ""
    }
}
