//! EditData Core Types
//!
//! This crate provides the foundational types used throughout EditData:
//! - Row identity (RowId)
//! - Cell values (the Value enum) and declared column types (SqlType)
//! - Cells and rows of a materialized result (CellValue, Row)
//! - The ResultSetCache contract and an in-memory implementation

mod cell;
mod error;
mod id;
mod result_set;
mod sql_type;
mod value;

pub use cell::*;
pub use error::*;
pub use id::*;
pub use result_set::*;
pub use sql_type::*;
pub use value::*;
