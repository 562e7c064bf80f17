//! EditData Commit
//!
//! Pending-record bookkeeping and the commit algorithm.
//!
//! Responsibilities:
//! - Hold at most one pending record per row (EditCache)
//! - Order records for commit: creates, updates, deletes (descending)
//! - Execute records one at a time against an EditConnection
//! - Reconcile the result set after each successful statement

mod cache;
mod connection;
mod coordinator;
mod error;

pub use cache::{EditCache, InsertOutcome};
pub use connection::{DriverError, EditConnection};
pub use coordinator::{CommitCoordinator, CommitSummary, EditState, SharedEditState};
pub use error::{CommitError, CommitResult};
