//! EditData Metadata
//!
//! Table and column metadata consumed by the edit engine.
//!
//! Responsibilities:
//! - Describe columns (key, updatable, calculated, default value)
//! - Resolve the key columns used to identify a row
//! - Reconcile discovered metadata with the columns a query returned
//! - Escape identifiers for generated SQL

mod column;
mod error;
mod identifier;
mod provider;
mod table;

pub use column::ColumnMetadata;
pub use error::{MetadataError, MetadataResult};
pub use identifier::{escape_identifier, escape_multipart};
pub use provider::{ObjectKind, TableMetadataProvider, TableRef};
pub use table::{TableMetadata, TableMetadataBuilder};
