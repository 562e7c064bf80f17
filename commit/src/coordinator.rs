//! Applies pending records to the database, one at a time, in commit order.

use editdata_core::ResultSetCache;
use editdata_edit::{AppliedChange, EditRecord};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, trace, warn};

use crate::cache::EditCache;
use crate::connection::EditConnection;
use crate::error::{CommitError, CommitResult};

/// Everything a session mutates: its pending records and the result set.
pub struct EditState {
    pub cache: EditCache,
    pub result_set: Box<dyn ResultSetCache>,
}

impl EditState {
    pub fn new(result_set: Box<dyn ResultSetCache>) -> Self {
        Self {
            cache: EditCache::new(),
            result_set,
        }
    }
}

/// Session state shared with an in-flight commit. Never locked across an await.
pub type SharedEditState = Arc<Mutex<EditState>>;

/// What a successful commit did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Every applied change in execution order.
    pub changes: Vec<AppliedChange>,
}

impl CommitSummary {
    fn record(&mut self, change: AppliedChange) {
        match change {
            AppliedChange::Inserted { .. } => self.created += 1,
            AppliedChange::Updated { .. } => self.updated += 1,
            AppliedChange::Removed { .. } => self.deleted += 1,
        }
        self.changes.push(change);
    }

    /// Number of records applied.
    pub fn total(&self) -> usize {
        self.changes.len()
    }
}

/// Runs one commit attempt over a session's shared state.
///
/// The commit is not transactional: records are executed strictly in commit
/// order and the first failure stops it. Every record applied before the
/// failure stays applied and leaves the cache; the failing record and every
/// record after it stay pending.
pub struct CommitCoordinator {
    state: SharedEditState,
}

impl CommitCoordinator {
    pub fn new(state: SharedEditState) -> Self {
        Self { state }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn run(&self, connection: &dyn EditConnection) -> CommitResult<CommitSummary> {
        let started = Instant::now();
        let records = self.state.lock().cache.ordered_snapshot();
        info!(count = records.len(), "Committing edits");

        let mut summary = CommitSummary::default();
        for record in &records {
            if let Err(error) = self.apply_one(connection, record, &mut summary).await {
                warn!(
                    row_id = %error.row_id(),
                    applied = summary.total(),
                    remaining = records.len() - summary.total(),
                    error = %error,
                    "Commit stopped"
                );
                return Err(error);
            }
        }

        info!(
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Commit finished"
        );
        Ok(summary)
    }

    async fn apply_one(
        &self,
        connection: &dyn EditConnection,
        record: &EditRecord,
        summary: &mut CommitSummary,
    ) -> CommitResult<()> {
        let row_id = record.row_id();
        let statement = record
            .build_command()
            .map_err(|e| CommitError::edit(row_id, e))?;
        trace!(row_id = %row_id, sql = %statement.sql, "Executing edit");

        let outcome = connection
            .execute(&statement)
            .await
            .map_err(|e| CommitError::execution(row_id, e))?;

        let change = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let change = record
                .apply_result(state.result_set.as_mut(), &outcome)
                .map_err(|e| CommitError::edit(row_id, e))?;
            state.cache.remove(row_id);
            change
        };
        summary.record(change);
        Ok(())
    }
}
