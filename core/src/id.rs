//! Row identity.
//!
//! Row ids are:
//! - Stable for the lifetime of an edit session
//! - Never renumbered when a row is removed
//! - Minted monotonically for rows created by the session

use std::fmt;

/// Identifier of one logical row within an edit session.
///
/// Ids below the original row count address rows materialized by the query
/// engine; ids at or above it are allocated by the session for new rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl RowId {
    /// Create a new RowId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Convert a caller-supplied signed id. Negative ids never address a row.
    pub fn from_signed(id: i64) -> Option<Self> {
        u64::try_from(id).ok().map(Self)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The id immediately after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
