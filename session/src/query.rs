//! The executed query an edit session is opened against.

use editdata_core::ResultSetCache;

use crate::error::{SessionError, SessionResult};

/// A query whose results an edit session can adopt.
pub trait CompletedQuery {
    type ResultSet: ResultSetCache + 'static;

    /// Whether execution has finished.
    fn has_executed(&self) -> bool;

    /// Number of result sets the query produced.
    fn result_set_count(&self) -> usize;

    /// Hand over the materialized result sets.
    fn into_result_sets(self) -> Vec<Self::ResultSet>;
}

/// Take the single result set of a finished query.
pub fn validate_for_session<Q: CompletedQuery>(query: Q) -> SessionResult<Q::ResultSet> {
    if !query.has_executed() {
        return Err(SessionError::QueryNotExecuted);
    }
    let count = query.result_set_count();
    if count != 1 {
        return Err(SessionError::InvalidResultSetCount { count });
    }

    let mut sets = query.into_result_sets();
    match (sets.pop(), sets.is_empty()) {
        (Some(result_set), true) => Ok(result_set),
        _ => Err(SessionError::InvalidResultSetCount { count }),
    }
}
