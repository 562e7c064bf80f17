//! EditData Session
//!
//! Edit sessions over executed queries.
//!
//! Responsibilities:
//! - Validate that a query produced exactly one finished result set
//! - Accept row and cell edits and keep them pending
//! - Export pending edits as a SQL script
//! - Commit pending edits asynchronously and report through callbacks

mod commit;
mod config;
mod error;
mod query;
mod result;
mod session;

pub use commit::CommitHandle;
pub use config::SessionConfig;
pub use error::{ErrorKind, SessionError, SessionResult};
pub use query::{validate_for_session, CompletedQuery};
pub use result::RowCreated;
pub use session::EditSession;
