//! EditData Edit Records
//!
//! Pending changes to the rows of a materialized result:
//! - `EditRecord`: the closed set of changes (create, update, delete)
//! - `CellUpdate`: client text coerced to a column's declared type
//! - SQL generation for execution (parameterized) and export (literal)
//! - Application of an executed change back onto the result set

pub mod cell;
pub mod context;
pub mod error;
pub mod ops;
pub mod record;
pub mod result;
pub mod sql;
pub mod statement;

pub use cell::CellUpdate;
pub use context::{EditContext, EditOptions};
pub use error::{EditError, EditResult};
pub use ops::{RowCreate, RowDelete, RowUpdate};
pub use record::{EditKind, EditRecord};
pub use result::{AppliedChange, EditCell, EditCellResult, EditRow, EditRowState};
pub use sql::{build_where_clause, format_literal, quote_unicode, WhereClause};
pub use statement::{EditStatement, ExecutionOutcome, Parameter};
